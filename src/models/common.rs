use serde::{Deserialize, Serialize};

/// A width and height, both in EMU (English Metric Units, 914400 per inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// The width in EMU.
    pub width: f64,
    /// The height in EMU.
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

fn default_scale() -> f64 {
    1.0
}

/// Placement shared by every slide element.
///
/// Positions and sizes are in EMU. For children of a group, `x` and `y` are
/// relative to the group's own origin. Rotation is in degrees, clockwise-positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Horizontal position of the element's top-left corner.
    #[serde(default)]
    pub x: f64,
    /// Vertical position of the element's top-left corner.
    #[serde(default)]
    pub y: f64,
    /// Unscaled width.
    #[serde(default)]
    pub width: f64,
    /// Unscaled height.
    #[serde(default)]
    pub height: f64,
    /// Horizontal scale factor applied to `width`.
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    /// Vertical scale factor applied to `height`.
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    /// Rotation in degrees, clockwise-positive.
    #[serde(default)]
    pub rotation: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl Geometry {
    /// Unrotated, unscaled geometry at `(x, y)` with the given size (all EMU).
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}
