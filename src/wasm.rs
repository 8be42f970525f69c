//! JavaScript entry point: runs a whole import against an in-memory scene and
//! hands the result back as JSON for the plugin side to replay.

use futures::executor::block_on;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::cancel::CancelHandle;
use crate::config::ImportOptions;
use crate::errors::Result;
use crate::host::memory::{MemoryHost, SceneSnapshot};
use crate::host::FontName;
use crate::import::{import_presentation, ImportEvent};
use crate::models::image_data::ImageDataMap;
use crate::models::presentation::Presentation;
use crate::scene::ElementFailure;

/// Everything the plugin side needs after an import.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutput {
    pub events: Vec<ImportEvent>,
    pub failures: Vec<ElementFailure>,
    pub scene: SceneSnapshot,
}

/// Imports a presentation given as JSON.
///
/// `images` and `available_fonts` may be empty strings: no pre-fetched
/// images, and every font loads. `options` may be empty for the defaults.
/// Only malformed JSON is an `Err`; import failures end up as a terminal
/// event in the output.
#[wasm_bindgen]
pub fn import_presentation_json(
    presentation: &str,
    images: &str,
    options: &str,
    available_fonts: &str,
) -> std::result::Result<String, JsValue> {
    init_logging();
    run_json(presentation, images, options, available_fonts).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn run_json(presentation: &str, images: &str, options: &str, available_fonts: &str) -> Result<String> {
    let presentation = Presentation::from_json(presentation)?;
    let images: ImageDataMap = parse_or_default(images)?;
    let options: ImportOptions = parse_or_default(options)?;
    let mut host = if available_fonts.trim().is_empty() {
        MemoryHost::new()
    } else {
        let fonts: Vec<FontName> = serde_json::from_str(available_fonts)?;
        MemoryHost::with_fonts(fonts)
    };

    let mut events = Vec::new();
    let outcome = block_on(import_presentation(
        &mut host,
        &presentation,
        &images,
        &options,
        &CancelHandle::new(),
        &mut |event| events.push(event),
    ));
    let failures = outcome
        .map(|report| report.failures().cloned().collect())
        .unwrap_or_default();

    let output = ImportOutput {
        events,
        failures,
        scene: host.snapshot(),
    };
    Ok(serde_json::to_string(&output)?)
}

fn parse_or_default<T: Default + for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    if json.trim().is_empty() {
        Ok(T::default())
    } else {
        Ok(serde_json::from_str(json)?)
    }
}

fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    {
        // Fails only when a logger is already installed.
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
