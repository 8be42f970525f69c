pub mod cancel;
pub mod config;
pub mod errors;
pub mod fonts;
pub mod geometry;
pub mod host;
pub mod import;
pub mod models;
pub mod scene;

pub use cancel::{CancelHandle, ControlMessage};
pub use config::ImportOptions;
pub use errors::{ImportError, Result};
pub use host::memory::MemoryHost;
pub use host::SceneHost;
pub use import::{import_presentation, ImportEvent, ImportReport};
pub use models::image_data::{ImageData, ImageDataMap};
pub use models::presentation::Presentation;

// wasm entry point
pub mod wasm;
pub use wasm::import_presentation_json;
