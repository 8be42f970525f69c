//! Import options, usually sent by the plugin UI as JSON alongside the request.

use serde::{Deserialize, Serialize};

use crate::errors::{ImportError, Result};
use crate::scene::constants::{
    DEFAULT_SLIDE_GAP, DEFAULT_TARGET_HEIGHT, DEFAULT_TARGET_WIDTH, MAX_GROUP_DEPTH,
    TABLE_CELL_PADDING, TABLE_FONT_SIZE, TEXT_PADDING,
};

/// Options controlling one import run.
///
/// Every field has a default, so `{}` is a valid options document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    /// Scale every slide uniformly into `target_width` x `target_height`.
    /// When false, slides keep their converted page size.
    pub fit_to_canvas: bool,
    pub target_width: f64,
    pub target_height: f64,
    /// Horizontal space between consecutive slide frames.
    pub slide_gap: f64,
    /// Maximum group nesting depth before children are rejected.
    pub max_group_depth: usize,
    /// Inset between a shape's box and its text box, before scaling.
    pub text_padding: f64,
    /// Fixed font size of table cell text. Not scaled with geometry.
    pub table_font_size: f64,
    /// Inset between a table cell and its text.
    pub table_cell_padding: f64,
    /// Slide frames are named "{name_prefix} {n}".
    pub name_prefix: String,
    /// Scroll the created frames into view when the import completes.
    pub focus_on_complete: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            fit_to_canvas: true,
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            slide_gap: DEFAULT_SLIDE_GAP,
            max_group_depth: MAX_GROUP_DEPTH,
            text_padding: TEXT_PADDING,
            table_font_size: TABLE_FONT_SIZE,
            table_cell_padding: TABLE_CELL_PADDING,
            name_prefix: "Slide".to_string(),
            focus_on_complete: true,
        }
    }
}

impl ImportOptions {
    /// Parses options from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: ImportOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Options with fit-to-canvas turned off.
    pub fn unscaled() -> Self {
        Self {
            fit_to_canvas: false,
            ..Default::default()
        }
    }

    /// Rejects values that would produce degenerate geometry.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ImportError::InvalidOptions(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )))
            }
        };
        if self.fit_to_canvas {
            positive("targetWidth", self.target_width)?;
            positive("targetHeight", self.target_height)?;
        }
        positive("tableFontSize", self.table_font_size)?;
        for (name, value) in [
            ("slideGap", self.slide_gap),
            ("textPadding", self.text_padding),
            ("tableCellPadding", self.table_cell_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ImportError::InvalidOptions(format!(
                    "{} must be zero or positive, got {}",
                    name, value
                )));
            }
        }
        if self.max_group_depth == 0 {
            return Err(ImportError::InvalidOptions(
                "maxGroupDepth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let options = ImportOptions::from_json("{}").unwrap();
        assert_eq!(options, ImportOptions::default());
        assert!(options.fit_to_canvas);
        assert_eq!(options.target_width, 1920.0);
    }

    #[test]
    fn partial_json_overrides() {
        let options =
            ImportOptions::from_json(r#"{"fitToCanvas": false, "slideGap": 40, "namePrefix": "Page"}"#)
                .unwrap();
        assert!(!options.fit_to_canvas);
        assert_eq!(options.slide_gap, 40.0);
        assert_eq!(options.name_prefix, "Page");
        assert_eq!(options.target_height, 1080.0);
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(matches!(
            ImportOptions::from_json(r#"{"targetWidth": 0}"#),
            Err(ImportError::InvalidOptions(_))
        ));
        assert!(matches!(
            ImportOptions::from_json(r#"{"slideGap": -1}"#),
            Err(ImportError::InvalidOptions(_))
        ));
        assert!(matches!(
            ImportOptions::from_json(r#"{"maxGroupDepth": 0}"#),
            Err(ImportError::InvalidOptions(_))
        ));
        // Target size is irrelevant when not fitting.
        assert!(ImportOptions::from_json(r#"{"fitToCanvas": false, "targetWidth": 0}"#).is_ok());
    }
}
