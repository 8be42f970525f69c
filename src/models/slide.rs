use serde::{Deserialize, Serialize};

use crate::models::elements::SlideElement;

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// The object ID of the slide in the source document.
    #[serde(default)]
    pub object_id: String,

    /// Zero-based position in the deck. Falls back to the slide's position in
    /// `Presentation::slides` when absent.
    #[serde(default)]
    pub index: Option<usize>,

    /// The elements on the slide in paint order: later elements draw over earlier ones.
    #[serde(default)]
    pub elements: Vec<SlideElement>,
}
