// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::common::Geometry;
use crate::models::group::Group;
use crate::models::image::Image;
use crate::models::line::Line;
use crate::models::shape::Shape;
use crate::models::table::Table;

/// The specific kind of SlideElement represented as an enum with associated data.
/// The JSON representation uses the field name as the key (e.g., "shape": {...}, "image": {...}).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideElementKind {
    /// A generic shape, optionally carrying text.
    Shape(Shape),
    /// An image page element.
    Image(Image),
    /// A line page element.
    Line(Line),
    /// A table page element.
    Table(Table),
    /// A collection of elements joined as a single unit.
    Group(Group),
}

impl SlideElementKind {
    /// Short lowercase name of the kind, used in logs and node names.
    pub fn name(&self) -> &'static str {
        match self {
            SlideElementKind::Shape(_) => "shape",
            SlideElementKind::Image(_) => "image",
            SlideElementKind::Line(_) => "line",
            SlideElementKind::Table(_) => "table",
            SlideElementKind::Group(_) => "group",
        }
    }
}

/// A visual element placed on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideElement {
    /// The object ID of the element in the source document.
    #[serde(default)]
    pub object_id: String,

    /// Position, size, scale and rotation.
    #[serde(flatten)]
    pub geometry: Geometry,

    /// The specific kind of element and its properties.
    /// Flattened so the JSON key ("shape", "image", ...) selects the variant.
    #[serde(flatten)]
    pub element_kind: SlideElementKind,
}

impl SlideElement {
    pub fn new(object_id: impl Into<String>, geometry: Geometry, element_kind: SlideElementKind) -> Self {
        Self {
            object_id: object_id.into(),
            geometry,
            element_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shape::ShapeType;

    #[test]
    fn deserializes_flattened_shape() {
        let json = r#"{
            "objectId": "s1",
            "x": 12700, "y": 25400, "width": 914400, "height": 457200,
            "rotation": 15,
            "shape": { "shapeType": "STAR_5", "fill": { "red": 1 } }
        }"#;
        let element: SlideElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.object_id, "s1");
        assert_eq!(element.geometry.scale_x, 1.0);
        assert_eq!(element.geometry.rotation, 15.0);
        match element.element_kind {
            SlideElementKind::Shape(shape) => {
                assert_eq!(shape.shape_type, ShapeType::Other);
                assert_eq!(shape.fill.map(|c| c.red), Some(1.0));
            }
            other => panic!("expected shape, got {}", other.name()),
        }
    }

    #[test]
    fn deserializes_nested_group() {
        let json = r#"{
            "objectId": "g1", "x": 100, "y": 50,
            "group": { "children": [
                { "objectId": "l1", "width": 10, "height": 0, "line": {} },
                { "objectId": "i1", "image": { "url": "https://img/1" } }
            ] }
        }"#;
        let element: SlideElement = serde_json::from_str(json).unwrap();
        let SlideElementKind::Group(group) = element.element_kind else {
            panic!("expected group");
        };
        assert_eq!(group.children.len(), 2);
        assert_eq!(group.children[1].element_kind.name(), "image");
    }
}
