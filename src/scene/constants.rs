//! Defines constants used throughout the scene materialization process.

use crate::models::colors::RgbColor;

// Default values used when specific properties are missing.
pub const DEFAULT_FONT_SIZE_PT: f64 = 11.0; // Default fallback font size in points
pub const DEFAULT_FONT_FAMILY: &str = "Arial"; // Default fallback font family
pub const DEFAULT_LINE_WEIGHT: f64 = 1.0;

// Canvas and layout defaults (overridable through ImportOptions).
pub const DEFAULT_TARGET_WIDTH: f64 = 1920.0;
pub const DEFAULT_TARGET_HEIGHT: f64 = 1080.0;
pub const DEFAULT_SLIDE_GAP: f64 = 100.0;
pub const MAX_GROUP_DEPTH: usize = 32;
pub const TEXT_PADDING: f64 = 4.0;

// Tables
pub const TABLE_FONT_SIZE: f64 = 10.0;
pub const TABLE_FONT_FAMILY: &str = "Inter";
pub const TABLE_CELL_PADDING: f64 = 4.0;
pub const TABLE_CELL_BACKGROUND: RgbColor = RgbColor::WHITE;
pub const TABLE_BORDER_COLOR: RgbColor = RgbColor::new(0.8, 0.8, 0.8);
pub const TABLE_BORDER_WEIGHT: f64 = 1.0;

// Round rectangles: radius relative to the shorter side.
pub const ROUND_RECT_RADIUS_RATIO: f64 = 0.08;
pub const MIN_CORNER_RADIUS: f64 = 2.0;

/// Fill of the rectangle standing in for an image that could not be used.
pub const PLACEHOLDER_COLOR: RgbColor = RgbColor::new(0.88, 0.88, 0.88);
pub const SLIDE_BACKGROUND: RgbColor = RgbColor::WHITE;
pub const DEFAULT_TEXT_COLOR: RgbColor = RgbColor::BLACK;
