use thiserror::Error;

use crate::fonts::FontError;
use crate::host::HostError;

/// Pipeline-level failures of an import. Each one ends the import with a
/// single terminal event; nodes created so far are left in place.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The presentation contains no slides.
    #[error("No slides found in presentation")]
    NoSlides,

    /// The page size is missing, zero, negative or not finite.
    #[error("Invalid presentation page size: {width} x {height}")]
    InvalidPageSize { width: f64, height: f64 },

    /// The import options are unusable.
    #[error("Invalid import options: {0}")]
    InvalidOptions(String),

    /// The host signalled cancellation before the import finished.
    #[error("Import cancelled after {slides_created} slide(s)")]
    Cancelled { slides_created: usize },

    /// A host call outside of element materialization failed (e.g. creating a slide frame).
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// The host has no usable font at all.
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    /// Error occurred during the deserialization of JSON input.
    #[error("Failed to deserialize JSON input: {0}")]
    JsonDeserialization(#[from] serde_json::Error),
}

/// A type alias for `Result<T, ImportError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ImportError>;
