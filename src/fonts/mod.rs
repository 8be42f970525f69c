//! Resolves requested fonts to fonts the host can actually load.
//!
//! Resolution walks a fixed ladder of candidates and never fails unless the
//! host cannot even load the last-resort fonts. Results are memoized for the
//! lifetime of one [`FontResolver`], i.e. one import.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::host::{FontName, HostError, SceneHost};

// --- Fallback tables ---

/// Families mapped to a close, commonly installed substitute.
const FAMILY_FALLBACKS: &[(&str, &str)] = &[
    ("Roboto", "Inter"),
    ("Helvetica", "Inter"),
    ("Helvetica Neue", "Inter"),
    ("Arial", "Inter"),
    ("Calibri", "Inter"),
    ("Open Sans", "Inter"),
    ("Lato", "Inter"),
    ("Montserrat", "Inter"),
    ("Times New Roman", "Georgia"),
    ("Times", "Georgia"),
    ("Cambria", "Georgia"),
    ("Garamond", "Georgia"),
    ("Courier New", "Roboto Mono"),
    ("Courier", "Roboto Mono"),
    ("Consolas", "Roboto Mono"),
    ("Source Code Pro", "Roboto Mono"),
];

const MONO_CANDIDATES: &[&str] = &["Roboto Mono", "Courier New"];
const SERIF_CANDIDATES: &[&str] = &["Georgia", "Times New Roman"];
const SANS_CANDIDATES: &[&str] = &["Inter", "Roboto", "Arial"];

/// Tried in order once everything else failed. The last one is allowed to fail the import.
const LAST_RESORT: &[(&str, &str)] = &[("Inter", "Regular"), ("Arial", "Regular")];

static MONO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mono|courier|consolas|code").expect("valid regex"));
static SERIF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)serif|georgia|times|garamond|palatino").expect("valid regex"));
static SANS_SERIF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)sans[ -]?serif").expect("valid regex"));

/// Errors of the font resolution ladder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    /// Not even the last-resort fonts load: the host has no usable font.
    #[error("No usable font for '{requested}': last resort failed: {source}")]
    NoUsableFont {
        requested: String,
        #[source]
        source: HostError,
    },
}

/// Broad typeface category used to pick generic fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontCategory {
    Sans,
    Serif,
    Mono,
}

impl FontCategory {
    /// Classifies a family name by keyword. Monospace wins over serif so that
    /// e.g. "Roboto Mono" and "Source Code Pro" land in `Mono`; an explicit
    /// "Sans Serif" is sans.
    pub fn classify(family: &str) -> Self {
        if MONO_RE.is_match(family) {
            FontCategory::Mono
        } else if SERIF_RE.is_match(family) && !SANS_SERIF_RE.is_match(family) {
            FontCategory::Serif
        } else {
            FontCategory::Sans
        }
    }

    fn candidates(self) -> &'static [&'static str] {
        match self {
            FontCategory::Mono => MONO_CANDIDATES,
            FontCategory::Serif => SERIF_CANDIDATES,
            FontCategory::Sans => SANS_CANDIDATES,
        }
    }
}

/// Style name for a weight/italic combination, e.g. "Bold Italic".
pub fn style_name(weight: u16, italic: bool) -> &'static str {
    match (weight >= 700, italic) {
        (true, true) => "Bold Italic",
        (true, false) => "Bold",
        (false, true) => "Italic",
        (false, false) => "Regular",
    }
}

/// The mapped substitute family, if the table has one (case-insensitive).
pub fn mapped_family(family: &str) -> Option<&'static str> {
    let family = family.trim();
    FAMILY_FALLBACKS
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(family))
        .map(|(_, to)| *to)
}

/// A font the host has loaded, ready to be assigned to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFont {
    pub font: FontName,
    /// True when the loaded font differs from the exact request.
    pub substituted: bool,
}

/// A recorded substitution, reported at the end of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSubstitution {
    pub requested: FontName,
    pub resolved: FontName,
}

/// Builds the ordered, de-duplicated candidate list for one request.
///
/// The last-resort entries are not included; see [`LAST_RESORT`].
pub fn ladder(family: &str, weight: u16, italic: bool) -> Vec<FontName> {
    let full = style_name(weight, italic);
    let weight_only = style_name(weight, false);
    let mut steps: Vec<FontName> = Vec::new();
    let mut push = |family: &str, style: &str| {
        let candidate = FontName::new(family, style);
        if !steps.contains(&candidate) {
            steps.push(candidate);
        }
    };

    // 1. exact, 2. drop italic
    push(family, full);
    if italic {
        push(family, weight_only);
    }
    // 3. mapped family
    if let Some(mapped) = mapped_family(family) {
        push(mapped, full);
        push(mapped, weight_only);
    }
    // 4. category fallback
    for candidate in FontCategory::classify(family).candidates() {
        push(candidate, full);
        push(candidate, weight_only);
    }
    steps
}

/// Memoizing font resolver. One instance lives for one import.
#[derive(Debug, Default)]
pub struct FontResolver {
    resolved: HashMap<(String, u16, bool), ResolvedFont>,
    loaded: HashSet<FontName>,
    unavailable: HashSet<FontName>,
    substitutions: Vec<FontSubstitution>,
}

impl FontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitutions made so far, in the order they were first resolved.
    pub fn substitutions(&self) -> &[FontSubstitution] {
        &self.substitutions
    }

    /// Resolves `(family, weight, italic)` to a font the host has loaded.
    ///
    /// Candidates are tried strictly one after another. Only the failure of the
    /// final last-resort font is returned as an error.
    pub async fn resolve<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        family: &str,
        weight: u16,
        italic: bool,
    ) -> Result<ResolvedFont, FontError> {
        let key = (family.to_string(), weight, italic);
        if let Some(hit) = self.resolved.get(&key) {
            return Ok(hit.clone());
        }

        let requested = FontName::new(family, style_name(weight, italic));
        for candidate in ladder(family, weight, italic) {
            if self.try_load(host, &candidate).await.is_ok() {
                return Ok(self.remember(key, requested, candidate));
            }
        }

        let mut last_error = HostError::FontUnavailable(requested.to_string());
        for (family, style) in LAST_RESORT {
            let candidate = FontName::new(*family, *style);
            match self.try_load(host, &candidate).await {
                Ok(()) => return Ok(self.remember(key, requested, candidate)),
                Err(e) => last_error = e,
            }
        }

        warn!("No usable font for '{}': host has none of the last-resort fonts", requested);
        Err(FontError::NoUsableFont {
            requested: requested.to_string(),
            source: last_error,
        })
    }

    /// Loads one candidate, asking the host at most once per font.
    async fn try_load<H: SceneHost + ?Sized>(&mut self, host: &mut H, font: &FontName) -> Result<(), HostError> {
        if self.loaded.contains(font) {
            return Ok(());
        }
        if self.unavailable.contains(font) {
            return Err(HostError::FontUnavailable(font.to_string()));
        }
        match host.load_font(font).await {
            Ok(()) => {
                self.loaded.insert(font.clone());
                Ok(())
            }
            Err(e) => {
                debug!("Font '{}' failed to load: {}", font, e);
                self.unavailable.insert(font.clone());
                Err(e)
            }
        }
    }

    fn remember(&mut self, key: (String, u16, bool), requested: FontName, font: FontName) -> ResolvedFont {
        let substituted = font != requested;
        if substituted {
            info!("Font '{}' unavailable, using '{}'", requested, font);
            self.substitutions.push(FontSubstitution {
                requested,
                resolved: font.clone(),
            });
        }
        let resolved = ResolvedFont { font, substituted };
        self.resolved.insert(key, resolved.clone());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn style_derivation() {
        assert_eq!(style_name(400, false), "Regular");
        assert_eq!(style_name(400, true), "Italic");
        assert_eq!(style_name(700, false), "Bold");
        assert_eq!(style_name(900, true), "Bold Italic");
        assert_eq!(style_name(699, true), "Italic");
    }

    #[test]
    fn classification() {
        assert_eq!(FontCategory::classify("Roboto Mono"), FontCategory::Mono);
        assert_eq!(FontCategory::classify("Source Code Pro"), FontCategory::Mono);
        assert_eq!(FontCategory::classify("Courier New"), FontCategory::Mono);
        assert_eq!(FontCategory::classify("EB Garamond"), FontCategory::Serif);
        assert_eq!(FontCategory::classify("PT Serif"), FontCategory::Serif);
        assert_eq!(FontCategory::classify("Times New Roman"), FontCategory::Serif);
        assert_eq!(FontCategory::classify("Microsoft Sans Serif"), FontCategory::Sans);
        assert_eq!(FontCategory::classify("Oswald"), FontCategory::Sans);
    }

    #[test]
    fn ladder_order_without_duplicates() {
        let steps = ladder("Roboto", 700, true);
        let names: Vec<String> = steps.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec![
                "Roboto Bold Italic",
                "Roboto Bold",
                "Inter Bold Italic",
                "Inter Bold",
                "Arial Bold Italic",
                "Arial Bold",
            ]
        );
    }

    #[tokio::test]
    async fn exact_match_first() {
        let mut host = MemoryHost::new();
        let mut fonts = FontResolver::new();
        let resolved = fonts.resolve(&mut host, "Oswald", 400, false).await.unwrap();
        assert_eq!(resolved.font, FontName::new("Oswald", "Regular"));
        assert!(!resolved.substituted);
        assert_eq!(host.font_requests().len(), 1);
    }

    #[tokio::test]
    async fn drops_italic_before_changing_family() {
        let mut host = MemoryHost::with_fonts([("Lora", "Regular")]);
        let mut fonts = FontResolver::new();
        let resolved = fonts.resolve(&mut host, "Lora", 400, true).await.unwrap();
        assert_eq!(resolved.font, FontName::new("Lora", "Regular"));
        assert!(resolved.substituted);
    }

    #[tokio::test]
    async fn mapped_family_keeps_weight() {
        let mut host = MemoryHost::with_fonts([("Inter", "Regular"), ("Inter", "Bold")]);
        let mut fonts = FontResolver::new();
        let resolved = fonts.resolve(&mut host, "Roboto", 800, false).await.unwrap();
        assert_eq!(resolved.font, FontName::new("Inter", "Bold"));
        assert_eq!(
            host.font_requests(),
            &[FontName::new("Roboto", "Bold"), FontName::new("Inter", "Bold")]
        );
    }

    #[tokio::test]
    async fn category_fallback_for_unknown_serif() {
        let mut host = MemoryHost::with_fonts([("Georgia", "Italic"), ("Inter", "Regular")]);
        let mut fonts = FontResolver::new();
        let resolved = fonts.resolve(&mut host, "Playfair Serif", 400, true).await.unwrap();
        assert_eq!(resolved.font, FontName::new("Georgia", "Italic"));
    }

    #[tokio::test]
    async fn last_resort_and_bounded_attempts() {
        let mut host = MemoryHost::with_fonts([("Arial", "Regular")]);
        let mut fonts = FontResolver::new();
        let resolved = fonts.resolve(&mut host, "Wingdings", 700, true).await.unwrap();
        assert_eq!(resolved.font, FontName::new("Arial", "Regular"));
        let bound = ladder("Wingdings", 700, true).len() + LAST_RESORT.len();
        assert!(host.font_requests().len() <= bound);
    }

    #[tokio::test]
    async fn fails_only_without_any_font() {
        let mut host = MemoryHost::with_fonts(Vec::<FontName>::new());
        let mut fonts = FontResolver::new();
        let err = fonts.resolve(&mut host, "Inter", 400, false).await.unwrap_err();
        let FontError::NoUsableFont { source, .. } = err;
        assert_eq!(source, HostError::FontUnavailable("Arial Regular".to_string()));
    }

    #[tokio::test]
    async fn memoizes_results_and_failures() {
        let mut host = MemoryHost::with_fonts([("Inter", "Regular")]);
        let mut fonts = FontResolver::new();
        fonts.resolve(&mut host, "Helvetica", 400, false).await.unwrap();
        let after_first = host.font_requests().len();
        fonts.resolve(&mut host, "Helvetica", 400, false).await.unwrap();
        assert_eq!(host.font_requests().len(), after_first);

        // Different key, but the mapped Inter Regular is already loaded.
        fonts.resolve(&mut host, "helvetica", 400, false).await.unwrap();
        let inter_requests = host
            .font_requests()
            .iter()
            .filter(|f| f.family == "Inter")
            .count();
        assert_eq!(inter_requests, 1);
        assert_eq!(fonts.substitutions().len(), 2);
    }
}
