use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;

/// A slide element kind representing a straight line.
/// The line runs from the element's top-left corner to its bottom-right corner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Line color. Black when absent.
    #[serde(default)]
    pub stroke_color: Option<RgbColor>,
    /// Line thickness in points. 1pt when absent.
    #[serde(default)]
    pub stroke_weight: Option<f64>,
}
