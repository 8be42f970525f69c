//! Materializes slide elements as host scene-graph nodes.
//!
//! This module provides [`SceneBuilder`], which dispatches every element by
//! kind to a leaf materializer and flattens groups into the slide frame.
//!
//! # Current Features & Limitations:
//! *   Rectangles, ellipses and round rectangles with solid fill and outline.
//! *   Shape text with per-run font, size, color, underline and strikethrough.
//! *   Images from pre-fetched bytes or data URIs, with a gray placeholder on failure.
//! *   Straight lines, tables as a grid of plain-text cells.
//! *   Other shape kinds are drawn as rectangles; gradients, arrow heads,
//!     charts, video and animations are not represented.

pub mod constants;
mod elements;
mod error;
mod image;
mod shapes;
mod table;
mod text;

pub use error::{Result, SceneError};

use log::warn;
use serde::Serialize;

use crate::cancel::CancelHandle;
use crate::config::ImportOptions;
use crate::fonts::FontResolver;
use crate::geometry::{FitScale, Offset, TargetBox};
use crate::host::{HostResult, NodeId, NodeKind, SceneHost};
use crate::models::elements::SlideElement;
use crate::models::image_data::ImageDataMap;

/// An element that could not be materialized (fully). The import went on without it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFailure {
    /// Position in the slide's element tree, e.g. "3" or "3.0.1" for group children.
    pub path: String,
    pub object_id: String,
    pub kind: &'static str,
    pub message: String,
}

/// Outcome of materializing one sequence of elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeReport {
    /// Leaf elements materialized without error.
    pub materialized: usize,
    pub failures: Vec<ElementFailure>,
}

impl MaterializeReport {
    fn record_failure(&mut self, path: &str, element: &SlideElement, error: &SceneError) {
        warn!(
            "Skipping {} element '{}' at {}: {}",
            element.element_kind.name(),
            element.object_id,
            path,
            error
        );
        self.failures.push(ElementFailure {
            path: path.to_string(),
            object_id: element.object_id.clone(),
            kind: element.element_kind.name(),
            message: error.to_string(),
        });
    }
}

/// Builds host nodes for slide elements. One builder serves one import, so
/// font resolutions are shared across all slides.
pub struct SceneBuilder<'a> {
    options: &'a ImportOptions,
    fit: FitScale,
    images: &'a ImageDataMap,
    fonts: FontResolver,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(options: &'a ImportOptions, fit: FitScale, images: &'a ImageDataMap) -> Self {
        Self {
            options,
            fit,
            images,
            fonts: FontResolver::new(),
        }
    }

    pub fn fonts(&self) -> &FontResolver {
        &self.fonts
    }

    /// Materializes `elements` into `container` in order.
    ///
    /// A failing element is logged and recorded, and the next sibling is
    /// processed anyway. Stops early, without further host calls, once
    /// `cancel` is set.
    pub async fn materialize_all<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: NodeId,
        elements: &[SlideElement],
        cancel: &CancelHandle,
    ) -> MaterializeReport {
        let mut report = MaterializeReport::default();
        for (index, element) in elements.iter().enumerate() {
            if cancel.is_cancelled() {
                break;
            }
            let path = index.to_string();
            if let Err(e) = self
                .materialize(host, container, element, Offset::ZERO, 0, path.clone(), &mut report, cancel)
                .await
            {
                report.record_failure(&path, element, &e);
            }
        }
        report
    }

    /// Creates a node, names it and appends it on top of `container`.
    fn spawn<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        container: NodeId,
        kind: NodeKind,
        name: &str,
    ) -> HostResult<NodeId> {
        let node = host.create_node(kind)?;
        host.set_name(node, name)?;
        host.append_child(container, node)?;
        Ok(node)
    }
}

/// Applies size, position and rotation of a target box to a node.
fn place<H: SceneHost + ?Sized>(host: &mut H, node: NodeId, target: &TargetBox) -> HostResult<()> {
    host.resize(node, target.width, target.height)?;
    host.set_position(node, target.x, target.y)?;
    if target.rotation != 0.0 {
        host.set_rotation(node, target.rotation)?;
    }
    Ok(())
}

/// Node name for an element: its object ID, or kind and path when it has none.
fn node_name(element: &SlideElement, path: &str) -> String {
    if element.object_id.is_empty() {
        format!("{} {}", element.element_kind.name(), path)
    } else {
        element.object_id.clone()
    }
}
