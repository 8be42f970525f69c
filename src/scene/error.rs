use thiserror::Error;

use crate::fonts::FontError;
use crate::host::HostError;
use crate::models::image_data::ImageDataError;

/// Errors that can occur while materializing a single element.
/// They are collected per slide and never abort the import.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Image '{0}' is missing from the image data")]
    MissingImage(String),
    #[error("Image data could not be used: {0}")]
    ImageData(#[from] ImageDataError),
    #[error("Group nesting exceeds {max} levels")]
    DepthExceeded { max: usize },
}

/// A specialized Result type for element materialization.
pub type Result<T> = std::result::Result<T, SceneError>;
