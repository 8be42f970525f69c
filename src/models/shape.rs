use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;
use crate::models::text::TextContent;

/// The geometric kind of a shape.
///
/// Only a handful of kinds have a dedicated target primitive; everything else
/// deserializes to `Other` and is drawn as a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    /// Rectangle shape.
    #[default]
    Rectangle,
    /// Text box shape.
    TextBox,
    /// Round corner rectangle shape.
    RoundRectangle,
    /// Ellipse shape.
    Ellipse,
    /// Any other shape kind (arrows, stars, callouts...).
    #[serde(other)]
    Other,
}

/// A slide element kind representing a generic shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default)]
    pub shape_type: ShapeType,
    /// Solid background fill. `None` means the shape is unfilled.
    #[serde(default)]
    pub fill: Option<RgbColor>,
    /// Outline color. The outline is drawn only when a weight is present too.
    #[serde(default)]
    pub stroke_color: Option<RgbColor>,
    /// Outline weight in points.
    #[serde(default)]
    pub stroke_weight: Option<f64>,
    /// The text content of the shape, if any.
    #[serde(default)]
    pub text: Option<TextContent>,
}
