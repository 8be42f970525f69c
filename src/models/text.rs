use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;

/// Paragraph alignment of a text body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// The paragraph is aligned to the start of the line. Left-aligned for LTR text.
    #[default]
    Start,
    /// The paragraph is centered.
    Center,
    /// The paragraph is aligned to the end of the line. Right-aligned for LTR text.
    End,
    /// The paragraph is justified.
    Justified,
}

fn default_font_family() -> String {
    crate::scene::constants::DEFAULT_FONT_FAMILY.to_string()
}

fn default_font_size() -> f64 {
    crate::scene::constants::DEFAULT_FONT_SIZE_PT
}

fn default_font_weight() -> u16 {
    400
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text of this run.
    #[serde(default)]
    pub text: String,
    /// The font family, e.g. "Roboto".
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// The font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Numeric weight; 700 and above render bold.
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub italic: bool,
    /// Text color. Black when absent.
    #[serde(default)]
    pub color: Option<RgbColor>,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
}

impl TextRun {
    /// A plain run in the default family, size and weight.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            italic: false,
            color: None,
            underline: false,
            strikethrough: false,
        }
    }
}

/// The textual content of a shape: styled runs plus one paragraph alignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    /// Runs in reading order; their texts concatenate to the full text.
    #[serde(default)]
    pub runs: Vec<TextRun>,
    #[serde(default)]
    pub alignment: Alignment,
}

impl TextContent {
    /// The concatenation of every run's text.
    pub fn full_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// True when the text contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }
}
