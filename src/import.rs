//! Drives a whole import: one frame per slide, progress events, and exactly
//! one terminal event.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::cancel::CancelHandle;
use crate::config::ImportOptions;
use crate::errors::{ImportError, Result};
use crate::fonts::FontSubstitution;
use crate::geometry::FitScale;
use crate::host::{NodeId, NodeKind, Paint, SceneHost};
use crate::models::image_data::ImageDataMap;
use crate::models::presentation::Presentation;
use crate::scene::constants::SLIDE_BACKGROUND;
use crate::scene::{ElementFailure, SceneBuilder};

/// Messages sent to the host UI while an import runs.
///
/// Every import ends with exactly one of `Complete`, `Error` or `Cancelled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImportEvent {
    /// One slide finished. `progress` is a percentage and never decreases.
    Progress { progress: u8, text: String },
    #[serde(rename_all = "camelCase")]
    Complete { slide_count: usize },
    Error { message: String },
    #[serde(rename_all = "camelCase")]
    Cancelled { slides_created: usize },
}

/// Outcome of one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideReport {
    pub object_id: String,
    pub frame: NodeId,
    /// Leaf elements materialized without error.
    pub elements: usize,
    pub failures: Vec<ElementFailure>,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub fit: FitScale,
    pub slides: Vec<SlideReport>,
    pub substitutions: Vec<FontSubstitution>,
}

impl ImportReport {
    pub fn slides_created(&self) -> usize {
        self.slides.len()
    }

    /// Element failures of all slides, in slide order.
    pub fn failures(&self) -> impl Iterator<Item = &ElementFailure> {
        self.slides.iter().flat_map(|s| s.failures.iter())
    }
}

/// Imports `presentation` into `host`, one frame per slide.
///
/// `on_event` receives a progress event per finished slide and then exactly
/// one terminal event, also when an error is returned. Per-element failures
/// are not events; they are in the returned report. Nothing is rolled back
/// on error or cancellation.
pub async fn import_presentation<H: SceneHost + ?Sized>(
    host: &mut H,
    presentation: &Presentation,
    images: &ImageDataMap,
    options: &ImportOptions,
    cancel: &CancelHandle,
    on_event: &mut dyn FnMut(ImportEvent),
) -> Result<ImportReport> {
    let result = run_import(host, presentation, images, options, cancel, on_event).await;
    match &result {
        Ok(report) => {
            info!(
                "Import complete: {} slides, {} element failures, {} font substitutions",
                report.slides_created(),
                report.failures().count(),
                report.substitutions.len()
            );
            on_event(ImportEvent::Complete {
                slide_count: report.slides_created(),
            });
        }
        Err(ImportError::Cancelled { slides_created }) => {
            info!("Import cancelled after {} slides", slides_created);
            on_event(ImportEvent::Cancelled {
                slides_created: *slides_created,
            });
        }
        Err(e) => {
            error!("Import failed: {}", e);
            on_event(ImportEvent::Error { message: e.to_string() });
        }
    }
    result
}

async fn run_import<H: SceneHost + ?Sized>(
    host: &mut H,
    presentation: &Presentation,
    images: &ImageDataMap,
    options: &ImportOptions,
    cancel: &CancelHandle,
    on_event: &mut dyn FnMut(ImportEvent),
) -> Result<ImportReport> {
    options.validate()?;
    if presentation.slides.is_empty() {
        return Err(ImportError::NoSlides);
    }
    let fit = FitScale::for_page(&presentation.page_size, options)?;
    info!(
        "Importing {} slides at scale {:.3} into {}x{} frames",
        presentation.slides.len(),
        fit.scale,
        fit.frame_width,
        fit.frame_height
    );

    let total = presentation.slides.len();
    let mut builder = SceneBuilder::new(options, fit, images);
    let mut slides = Vec::with_capacity(total);

    for (index, slide) in presentation.slides.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled {
                slides_created: slides.len(),
            });
        }

        let position = slide.index.unwrap_or(index);
        let frame = create_slide_frame(host, &frame_name(presentation, options, position), options, &fit, index)?;
        let report = builder.materialize_all(host, frame, &slide.elements, cancel).await;
        debug!(
            "Slide {} ({}): {} elements, {} failures",
            index + 1,
            slide.object_id,
            report.materialized,
            report.failures.len()
        );
        slides.push(SlideReport {
            object_id: slide.object_id.clone(),
            frame,
            elements: report.materialized,
            failures: report.failures,
        });

        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled {
                slides_created: slides.len(),
            });
        }
        on_event(ImportEvent::Progress {
            progress: percent(index + 1, total),
            text: format!("Imported slide {} of {}", index + 1, total),
        });
    }

    if options.focus_on_complete {
        let frames: Vec<NodeId> = slides.iter().map(|s| s.frame).collect();
        if let Err(e) = host.focus(&frames) {
            warn!("Could not focus imported slides: {}", e);
        }
    }

    Ok(ImportReport {
        fit,
        slides,
        substitutions: builder.fonts().substitutions().to_vec(),
    })
}

/// Creates the `index`-th frame: named, sized, white, clipping, and placed in
/// a row with the previous frames.
fn create_slide_frame<H: SceneHost + ?Sized>(
    host: &mut H,
    name: &str,
    options: &ImportOptions,
    fit: &FitScale,
    index: usize,
) -> Result<NodeId> {
    let frame = host.create_node(NodeKind::Frame)?;
    host.set_name(frame, name)?;
    host.resize(frame, fit.frame_width, fit.frame_height)?;
    host.set_position(frame, index as f64 * (fit.frame_width + options.slide_gap), 0.0)?;
    host.set_fills(frame, vec![Paint::solid(SLIDE_BACKGROUND)])?;
    host.set_clips_content(frame, true)?;
    host.append_to_page(frame)?;
    Ok(frame)
}

/// Frame name of the slide at zero-based `position`.
fn frame_name(presentation: &Presentation, options: &ImportOptions, position: usize) -> String {
    match presentation.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => format!("{} – {} {}", title, options.name_prefix, position + 1),
        _ => format!("{} {}", options.name_prefix, position + 1),
    }
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done.min(total) * 100) / total) as u8
}
