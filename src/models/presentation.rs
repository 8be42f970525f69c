use serde::{Deserialize, Serialize};

use crate::models::common::Size;
use crate::models::slide::Slide;

/// A slide deck, already fetched and normalized by the document-fetch layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The title of the presentation.
    #[serde(default)]
    pub title: Option<String>,

    /// The size of pages in the presentation, in EMU.
    pub page_size: Size,

    /// The slides in presentation order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Parses a presentation from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
