//! An in-memory scene graph implementing [`SceneHost`].
//!
//! Used as the test double for the pipeline, by the demo program and by the
//! wasm entry point, which hands the resulting snapshot to the plugin side.
//! It enforces the host rules the pipeline has to respect: a font must be
//! loaded before it is assigned, and a text node needs a font before its
//! characters can be set.

use std::collections::HashSet;

use async_trait::async_trait;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::{
    FontName, HostError, HostResult, ImageHandle, NodeId, NodeKind, Paint, SceneHost,
    TextAlignHorizontal, TextAlignVertical, TextAutoResize, TextDecoration, TextRange,
};
use crate::models::image_data::ImageFormat;

/// One style override applied to a character range, in application order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum RangeProperty {
    FontName(FontName),
    FontSize(f64),
    Fills(Vec<Paint>),
    Decoration(TextDecoration),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeStyle {
    pub range: TextRange,
    pub property: RangeProperty,
}

/// Text-specific state of a text node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextState {
    pub characters: String,
    /// Node-wide font; `None` until assigned.
    pub font_name: Option<FontName>,
    pub font_size: f64,
    pub fills: Vec<Paint>,
    pub ranges: Vec<RangeStyle>,
    pub align_horizontal: TextAlignHorizontal,
    pub align_vertical: TextAlignVertical,
    pub auto_resize: TextAutoResize,
    pub truncate: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            characters: String::new(),
            font_name: None,
            font_size: 12.0,
            fills: Vec::new(),
            ranges: Vec::new(),
            align_horizontal: TextAlignHorizontal::Left,
            align_vertical: TextAlignVertical::Top,
            auto_resize: TextAutoResize::WidthAndHeight,
            truncate: false,
        }
    }
}

impl TextState {
    fn char_len(&self) -> usize {
        self.characters.chars().count()
    }

    /// The last override covering `index` that `pick` accepts.
    fn override_at<T>(&self, index: usize, pick: impl Fn(&RangeProperty) -> Option<T>) -> Option<T> {
        self.ranges
            .iter()
            .rev()
            .filter(|r| r.range.start <= index && index < r.range.end)
            .find_map(|r| pick(&r.property))
    }

    /// Effective font of the character at `index`.
    pub fn font_at(&self, index: usize) -> Option<FontName> {
        self.override_at(index, |p| match p {
            RangeProperty::FontName(f) => Some(f.clone()),
            _ => None,
        })
        .or_else(|| self.font_name.clone())
    }

    /// Effective font size of the character at `index`.
    pub fn font_size_at(&self, index: usize) -> f64 {
        self.override_at(index, |p| match p {
            RangeProperty::FontSize(s) => Some(*s),
            _ => None,
        })
        .unwrap_or(self.font_size)
    }

    /// Effective fills of the character at `index`.
    pub fn fills_at(&self, index: usize) -> Vec<Paint> {
        self.override_at(index, |p| match p {
            RangeProperty::Fills(f) => Some(f.clone()),
            _ => None,
        })
        .unwrap_or_else(|| self.fills.clone())
    }

    /// Effective decoration of the character at `index`.
    pub fn decoration_at(&self, index: usize) -> TextDecoration {
        self.override_at(index, |p| match p {
            RangeProperty::Decoration(d) => Some(*d),
            _ => None,
        })
        .unwrap_or(TextDecoration::None)
    }
}

/// A node of the in-memory scene graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: f64,
    pub corner_radius: f64,
    pub clips_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextState>,
}

impl MemoryNode {
    fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: 1.0,
            corner_radius: 0.0,
            clips_content: false,
            parent: None,
            children: Vec::new(),
            text: (kind == NodeKind::Text).then(TextState::default),
        }
    }
}

/// Serializable view of the whole scene.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    /// Top-level nodes of the page, in stacking order.
    pub page: Vec<NodeId>,
    pub nodes: Vec<MemoryNode>,
    pub images: Vec<ImageHandle>,
    pub focused: Vec<NodeId>,
}

/// In-memory [`SceneHost`].
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: IndexMap<NodeId, MemoryNode>,
    page: Vec<NodeId>,
    next_id: u64,
    /// `None` means every font is available.
    available_fonts: Option<HashSet<FontName>>,
    loaded_fonts: HashSet<FontName>,
    font_requests: Vec<FontName>,
    failing_kinds: HashSet<NodeKind>,
    failing_text_properties: HashSet<String>,
    images: Vec<ImageHandle>,
    focused: Vec<NodeId>,
}

impl MemoryHost {
    /// A host on which every font loads.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host on which only the given fonts load.
    pub fn with_fonts<I, F>(fonts: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FontName>,
    {
        Self {
            available_fonts: Some(fonts.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Makes every `create_node` call for `kind` fail.
    pub fn fail_creating(mut self, kind: NodeKind) -> Self {
        self.failing_kinds.insert(kind);
        self
    }

    /// Makes every text call for `property` fail, e.g. `"fontSize"`.
    pub fn fail_text_property(mut self, property: &str) -> Self {
        self.failing_text_properties.insert(property.to_string());
        self
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    /// Top-level nodes of the page, in stacking order.
    pub fn page(&self) -> &[NodeId] {
        &self.page
    }

    /// Children of `id` in stacking order.
    pub fn children(&self, id: NodeId) -> Vec<&MemoryNode> {
        self.nodes
            .get(&id)
            .map(|n| n.children.iter().filter_map(|c| self.nodes.get(c)).collect())
            .unwrap_or_default()
    }

    /// The first node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&MemoryNode> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Every node created so far, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &MemoryNode> {
        self.nodes.values()
    }

    /// Every `load_font` request, in order, including failed ones.
    pub fn font_requests(&self) -> &[FontName] {
        &self.font_requests
    }

    pub fn focused(&self) -> &[NodeId] {
        &self.focused
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            page: self.page.clone(),
            nodes: self.nodes.values().cloned().collect(),
            images: self.images.clone(),
            focused: self.focused.clone(),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> HostResult<&mut MemoryNode> {
        self.nodes.get_mut(&id).ok_or(HostError::NodeNotFound(id))
    }

    fn text_mut(&mut self, id: NodeId, operation: &str) -> HostResult<&mut TextState> {
        if self.failing_text_properties.contains(operation) {
            return Err(HostError::Rejected(format!("cannot set {}", operation)));
        }
        let node = self.node_mut(id)?;
        node.text.as_mut().ok_or_else(|| HostError::Unsupported {
            node: id,
            operation: operation.to_string(),
        })
    }

    fn check_range(text: &TextState, range: TextRange) -> HostResult<()> {
        if range.is_empty() || range.end > text.char_len() {
            return Err(HostError::Rejected(format!(
                "range {}..{} outside text of length {}",
                range.start,
                range.end,
                text.char_len()
            )));
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        let old_parent = self.nodes.get(&child).and_then(|n| n.parent);
        match old_parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| *c != child);
                }
            }
            None => self.page.retain(|c| *c != child),
        }
    }
}

#[async_trait(?Send)]
impl SceneHost for MemoryHost {
    fn create_node(&mut self, kind: NodeKind) -> HostResult<NodeId> {
        if self.failing_kinds.contains(&kind) {
            return Err(HostError::Rejected(format!("cannot create {:?} nodes", kind)));
        }
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, MemoryNode::new(id, kind));
        Ok(id)
    }

    fn set_name(&mut self, node: NodeId, name: &str) -> HostResult<()> {
        self.node_mut(node)?.name = name.to_string();
        Ok(())
    }

    fn resize(&mut self, node: NodeId, width: f64, height: f64) -> HostResult<()> {
        // Lines are zero-height; everything else needs a positive extent.
        let n = self.node_mut(node)?;
        let min_height = if n.kind == NodeKind::Line { 0.0 } else { 0.01 };
        if !(width >= 0.01 && height >= min_height) {
            return Err(HostError::Rejected(format!("invalid size {} x {}", width, height)));
        }
        n.width = width;
        n.height = height;
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> HostResult<()> {
        let n = self.node_mut(node)?;
        n.x = x;
        n.y = y;
        Ok(())
    }

    fn set_rotation(&mut self, node: NodeId, degrees: f64) -> HostResult<()> {
        self.node_mut(node)?.rotation = degrees;
        Ok(())
    }

    fn set_fills(&mut self, node: NodeId, fills: Vec<Paint>) -> HostResult<()> {
        self.node_mut(node)?.fills = fills;
        Ok(())
    }

    fn set_strokes(&mut self, node: NodeId, strokes: Vec<Paint>, weight: f64) -> HostResult<()> {
        let n = self.node_mut(node)?;
        n.strokes = strokes;
        n.stroke_weight = weight;
        Ok(())
    }

    fn set_corner_radius(&mut self, node: NodeId, radius: f64) -> HostResult<()> {
        self.node_mut(node)?.corner_radius = radius;
        Ok(())
    }

    fn set_clips_content(&mut self, node: NodeId, clips: bool) -> HostResult<()> {
        let n = self.node_mut(node)?;
        if n.kind != NodeKind::Frame {
            return Err(HostError::Unsupported {
                node,
                operation: "clipsContent".to_string(),
            });
        }
        n.clips_content = clips;
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> HostResult<()> {
        let parent_kind = self.nodes.get(&parent).ok_or(HostError::NodeNotFound(parent))?.kind;
        if !self.nodes.contains_key(&child) {
            return Err(HostError::NodeNotFound(child));
        }
        if parent_kind != NodeKind::Frame {
            return Err(HostError::Unsupported {
                node: parent,
                operation: "appendChild".to_string(),
            });
        }
        self.detach(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn append_to_page(&mut self, node: NodeId) -> HostResult<()> {
        if !self.nodes.contains_key(&node) {
            return Err(HostError::NodeNotFound(node));
        }
        self.detach(node);
        self.node_mut(node)?.parent = None;
        self.page.push(node);
        Ok(())
    }

    fn create_image(&mut self, bytes: &[u8]) -> HostResult<ImageHandle> {
        let format = ImageFormat::detect_from_bytes(bytes)
            .ok_or_else(|| HostError::InvalidImage(format!("unrecognized {} byte payload", bytes.len())))?;
        let handle = ImageHandle(format!("image-{}", self.images.len() + 1));
        debug!("Registered {:?} image as {}", format, handle.0);
        self.images.push(handle.clone());
        Ok(handle)
    }

    async fn load_font(&mut self, font: &FontName) -> HostResult<()> {
        self.font_requests.push(font.clone());
        let available = self
            .available_fonts
            .as_ref()
            .map_or(true, |fonts| fonts.contains(font));
        if available {
            self.loaded_fonts.insert(font.clone());
            Ok(())
        } else {
            Err(HostError::FontUnavailable(font.to_string()))
        }
    }

    fn set_font_name(&mut self, node: NodeId, range: Option<TextRange>, font: &FontName) -> HostResult<()> {
        if !self.loaded_fonts.contains(font) {
            return Err(HostError::FontNotLoaded(font.to_string()));
        }
        let text = self.text_mut(node, "fontName")?;
        match range {
            None => {
                text.font_name = Some(font.clone());
                text.ranges.retain(|r| !matches!(r.property, RangeProperty::FontName(_)));
            }
            Some(range) => {
                Self::check_range(text, range)?;
                text.ranges.push(RangeStyle {
                    range,
                    property: RangeProperty::FontName(font.clone()),
                });
            }
        }
        Ok(())
    }

    fn set_characters(&mut self, node: NodeId, characters: &str) -> HostResult<()> {
        let loaded = self.node(node).and_then(|n| n.text.as_ref()).and_then(|t| t.font_name.clone());
        match loaded {
            Some(font) if self.loaded_fonts.contains(&font) => {}
            Some(font) => return Err(HostError::FontNotLoaded(font.to_string())),
            None if self.node(node).is_some_and(|n| n.text.is_some()) => {
                return Err(HostError::FontNotLoaded("<unassigned>".to_string()))
            }
            None => {}
        }
        let text = self.text_mut(node, "characters")?;
        text.characters = characters.to_string();
        text.ranges.clear();
        Ok(())
    }

    fn set_font_size(&mut self, node: NodeId, range: Option<TextRange>, size: f64) -> HostResult<()> {
        if !(size >= 1.0) {
            return Err(HostError::Rejected(format!("font size {} below 1", size)));
        }
        let text = self.text_mut(node, "fontSize")?;
        match range {
            None => text.font_size = size,
            Some(range) => {
                Self::check_range(text, range)?;
                text.ranges.push(RangeStyle {
                    range,
                    property: RangeProperty::FontSize(size),
                });
            }
        }
        Ok(())
    }

    fn set_text_fills(&mut self, node: NodeId, range: Option<TextRange>, fills: Vec<Paint>) -> HostResult<()> {
        let text = self.text_mut(node, "fills")?;
        match range {
            None => text.fills = fills,
            Some(range) => {
                Self::check_range(text, range)?;
                text.ranges.push(RangeStyle {
                    range,
                    property: RangeProperty::Fills(fills),
                });
            }
        }
        Ok(())
    }

    fn set_text_decoration(&mut self, node: NodeId, range: TextRange, decoration: TextDecoration) -> HostResult<()> {
        let text = self.text_mut(node, "textDecoration")?;
        Self::check_range(text, range)?;
        text.ranges.push(RangeStyle {
            range,
            property: RangeProperty::Decoration(decoration),
        });
        Ok(())
    }

    fn set_text_align(
        &mut self,
        node: NodeId,
        horizontal: TextAlignHorizontal,
        vertical: TextAlignVertical,
    ) -> HostResult<()> {
        let text = self.text_mut(node, "textAlign")?;
        text.align_horizontal = horizontal;
        text.align_vertical = vertical;
        Ok(())
    }

    fn set_text_auto_resize(&mut self, node: NodeId, mode: TextAutoResize) -> HostResult<()> {
        self.text_mut(node, "textAutoResize")?.auto_resize = mode;
        Ok(())
    }

    fn set_text_truncation(&mut self, node: NodeId, truncate: bool) -> HostResult<()> {
        self.text_mut(node, "textTruncation")?.truncate = truncate;
        Ok(())
    }

    fn focus(&mut self, nodes: &[NodeId]) -> HostResult<()> {
        self.focused = nodes.to_vec();
        Ok(())
    }
}
