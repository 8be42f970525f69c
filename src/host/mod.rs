//! The narrow interface through which the pipeline mutates the host scene graph.
//!
//! Everything the import does to the host document goes through [`SceneHost`],
//! so the pipeline runs unchanged against a real plugin bridge or against the
//! in-memory [`memory::MemoryHost`].

mod error;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{HostError, HostResult};

use crate::models::colors::RgbColor;

/// Opaque handle of a node created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kinds of node the pipeline creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Frame,
    Rectangle,
    Ellipse,
    Line,
    Text,
}

/// Handle of an image registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub String);

/// How an image fills its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    /// Cover the node, cropping overflow.
    Fill,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid { color: RgbColor },
    Image { image: ImageHandle, scale_mode: ScaleMode },
}

impl Paint {
    pub fn solid(color: RgbColor) -> Self {
        Paint::Solid {
            color: color.clamped(),
        }
    }
}

/// A font as the host names it: family plus style name ("Bold Italic").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl From<(&str, &str)> for FontName {
    fn from((family, style): (&str, &str)) -> Self {
        FontName::new(family, style)
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// A half-open character range `[start, end)` of a text node, counted in
/// Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    None,
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignVertical {
    Top,
    Center,
    Bottom,
}

/// How a text node grows with its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    /// Fixed box.
    None,
    Height,
    WidthAndHeight,
}

/// Host scene-graph capability used by the import pipeline.
///
/// The pipeline is the only writer for the duration of an import. Range-based
/// text styling requires the node's default font to be loaded and assigned
/// first; hosts may reject range calls otherwise.
#[async_trait(?Send)]
pub trait SceneHost {
    /// Creates a detached node of the given kind.
    fn create_node(&mut self, kind: NodeKind) -> HostResult<NodeId>;

    fn set_name(&mut self, node: NodeId, name: &str) -> HostResult<()>;

    fn resize(&mut self, node: NodeId, width: f64, height: f64) -> HostResult<()>;

    /// Position relative to the node's parent.
    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> HostResult<()>;

    /// Rotation in degrees, clockwise-negative.
    fn set_rotation(&mut self, node: NodeId, degrees: f64) -> HostResult<()>;

    /// Replaces the node's fills. An empty list means "no fill".
    fn set_fills(&mut self, node: NodeId, fills: Vec<Paint>) -> HostResult<()>;

    /// Replaces the node's strokes and stroke weight.
    fn set_strokes(&mut self, node: NodeId, strokes: Vec<Paint>, weight: f64) -> HostResult<()>;

    fn set_corner_radius(&mut self, node: NodeId, radius: f64) -> HostResult<()>;

    fn set_clips_content(&mut self, node: NodeId, clips: bool) -> HostResult<()>;

    /// Appends `child` as the topmost child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> HostResult<()>;

    /// Appends a node to the current page.
    fn append_to_page(&mut self, node: NodeId) -> HostResult<()>;

    /// Registers encoded image bytes and returns a handle usable in an image paint.
    fn create_image(&mut self, bytes: &[u8]) -> HostResult<ImageHandle>;

    /// Loads a font so it can be used by text nodes. Fails if the host does not have it.
    async fn load_font(&mut self, font: &FontName) -> HostResult<()>;

    /// Assigns a loaded font to the whole node (`range == None`) or to a range.
    fn set_font_name(&mut self, node: NodeId, range: Option<TextRange>, font: &FontName) -> HostResult<()>;

    /// Replaces the node's text. The node's font must be loaded.
    fn set_characters(&mut self, node: NodeId, text: &str) -> HostResult<()>;

    fn set_font_size(&mut self, node: NodeId, range: Option<TextRange>, size: f64) -> HostResult<()>;

    fn set_text_fills(&mut self, node: NodeId, range: Option<TextRange>, fills: Vec<Paint>) -> HostResult<()>;

    fn set_text_decoration(&mut self, node: NodeId, range: TextRange, decoration: TextDecoration) -> HostResult<()>;

    fn set_text_align(
        &mut self,
        node: NodeId,
        horizontal: TextAlignHorizontal,
        vertical: TextAlignVertical,
    ) -> HostResult<()>;

    fn set_text_auto_resize(&mut self, node: NodeId, mode: TextAutoResize) -> HostResult<()>;

    /// Truncate overflowing text with an ellipsis instead of overflowing the box.
    fn set_text_truncation(&mut self, node: NodeId, truncate: bool) -> HostResult<()>;

    /// Scrolls and zooms the viewport onto the given nodes.
    fn focus(&mut self, _nodes: &[NodeId]) -> HostResult<()> {
        Ok(())
    }
}
