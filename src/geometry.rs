//! Maps document-space geometry (EMU, clockwise-positive rotation) into target
//! space (points, clockwise-negative rotation), applying the fit-to-canvas scale.

use serde::Serialize;

use crate::config::ImportOptions;
use crate::errors::{ImportError, Result};
use crate::models::common::{Geometry, Size};

pub const PT_PER_INCH: f64 = 72.0;
pub const EMU_PER_INCH: f64 = 914400.0;
// EMU (English Metric Unit) per Point (standard 72 DPI)
pub const EMU_PER_PT: f64 = EMU_PER_INCH / PT_PER_INCH; // 12700

/// Smallest width or height a materialized node may have.
pub const MIN_EXTENT: f64 = 1.0;

/// Converts EMU to points.
pub fn emu_to_pt(emu: f64) -> f64 {
    emu / EMU_PER_PT
}

/// Converts points to EMU.
pub fn pt_to_emu(pt: f64) -> f64 {
    pt * EMU_PER_PT
}

/// Converts a document rotation (clockwise-positive) into the target convention.
pub fn rotation_to_target(degrees: f64) -> f64 {
    if degrees == 0.0 {
        0.0 // avoid -0.0 showing up in node snapshots
    } else {
        -degrees
    }
}

/// Inverse of [`rotation_to_target`].
pub fn rotation_to_document(degrees: f64) -> f64 {
    rotation_to_target(degrees)
}

/// A position offset in document units, accumulated from enclosing groups.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    /// The origin of a group's children: this offset plus the group's own position.
    pub fn nested(self, group: &Geometry) -> Offset {
        Offset {
            x: self.x + group.x,
            y: self.y + group.y,
        }
    }
}

/// The uniform fit-to-canvas scale of one presentation, together with the
/// size every slide frame gets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitScale {
    pub scale: f64,
    pub frame_width: f64,
    pub frame_height: f64,
}

impl FitScale {
    /// Computes the scale once per presentation.
    ///
    /// With fit-to-canvas enabled the page is scaled uniformly (aspect
    /// preserved) into the target canvas and frames get the target size.
    /// Otherwise the scale is 1 and frames get the converted page size.
    pub fn for_page(page_size: &Size, options: &ImportOptions) -> Result<Self> {
        let page_w = emu_to_pt(page_size.width);
        let page_h = emu_to_pt(page_size.height);
        if !(page_w.is_finite() && page_h.is_finite() && page_w > 0.0 && page_h > 0.0) {
            return Err(ImportError::InvalidPageSize {
                width: page_size.width,
                height: page_size.height,
            });
        }

        if options.fit_to_canvas {
            let scale = (options.target_width / page_w).min(options.target_height / page_h);
            Ok(Self {
                scale,
                frame_width: options.target_width,
                frame_height: options.target_height,
            })
        } else {
            Ok(Self::identity(page_w, page_h))
        }
    }

    /// No scaling, frames of the given size in points.
    pub fn identity(frame_width: f64, frame_height: f64) -> Self {
        Self {
            scale: 1.0,
            frame_width,
            frame_height,
        }
    }

    /// Scales a length that is already in target units (stroke weights, font sizes, paddings).
    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale
    }
}

/// An element's box in target space, relative to the slide frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, target convention (clockwise-negative).
    pub rotation: f64,
}

impl TargetBox {
    /// Shrinks the box by `inset` on every side, keeping the minimum extent.
    pub fn inset(&self, inset: f64) -> TargetBox {
        TargetBox {
            x: self.x + inset,
            y: self.y + inset,
            width: (self.width - 2.0 * inset).max(MIN_EXTENT),
            height: (self.height - 2.0 * inset).max(MIN_EXTENT),
            rotation: self.rotation,
        }
    }
}

/// Width and height after unit conversion and all scale factors, without the
/// minimum-extent clamp. Signs of authored scale factors are discarded.
pub fn scaled_extent(geometry: &Geometry, fit: &FitScale) -> (f64, f64) {
    let width = emu_to_pt(geometry.width) * geometry.scale_x.abs() * fit.scale;
    let height = emu_to_pt(geometry.height) * geometry.scale_y.abs() * fit.scale;
    (finite_or_zero(width.abs()), finite_or_zero(height.abs()))
}

/// Maps an element into target space.
///
/// `offset` is the origin of the enclosing group chain in document units, so
/// the fit scale is applied exactly once however deep the element is nested.
pub fn to_target_space(geometry: &Geometry, offset: Offset, fit: &FitScale) -> TargetBox {
    let (width, height) = scaled_extent(geometry, fit);
    TargetBox {
        x: finite_or_zero(emu_to_pt(offset.x + geometry.x) * fit.scale),
        y: finite_or_zero(emu_to_pt(offset.y + geometry.y) * fit.scale),
        width: width.max(MIN_EXTENT),
        height: height.max(MIN_EXTENT),
        rotation: rotation_to_target(finite_or_zero(geometry.rotation)),
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
