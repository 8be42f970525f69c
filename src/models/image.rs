use serde::{Deserialize, Serialize};

/// A slide element kind representing an image.
///
/// The bytes are not carried here: `url` is the key into the image-data map
/// supplied alongside the presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Key (usually the content URL) of the pre-fetched image payload.
    pub url: String,
}
