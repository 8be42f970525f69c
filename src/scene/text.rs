//! Text nodes for shape text: one node per shape, styled run by run.

use log::{debug, warn};

use super::constants::DEFAULT_TEXT_COLOR;
use super::{error::Result, place, SceneBuilder};
use crate::geometry::{FitScale, TargetBox};
use crate::host::{
    FontName, HostResult, NodeId, NodeKind, Paint, SceneHost, TextAlignHorizontal, TextAlignVertical,
    TextAutoResize, TextDecoration, TextRange,
};
use crate::models::text::{Alignment, TextContent, TextRun};

impl<'a> SceneBuilder<'a> {
    /// Creates the text node of a shape on top of it, inset by the text padding.
    ///
    /// The node's default font is the first run's resolved font; every run
    /// then gets its own font, size, color and decoration on its range.
    pub(super) async fn materialize_text<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: NodeId,
        name: &str,
        content: &TextContent,
        shape_box: &TargetBox,
    ) -> Result<()> {
        if content.is_blank() {
            return Ok(());
        }
        let Some(first) = content.runs.first() else {
            return Ok(());
        };

        let default_font = self
            .fonts
            .resolve(host, &first.font_family, first.font_weight, first.italic)
            .await?;
        let characters = content.full_text();
        let node = self.create_text_node(host, container, &format!("{} text", name), &default_font.font, &characters)?;

        let mut cursor = 0;
        for run in &content.runs {
            let len = run.text.chars().count();
            let range = TextRange::new(cursor, cursor + len);
            cursor += len;
            if range.is_empty() {
                continue;
            }
            self.style_run(host, node, run, range).await;
        }

        let inner = shape_box.inset(self.fit.apply(self.options.text_padding));
        place(host, node, &inner)?;
        host.set_text_align(node, horizontal_alignment(content.alignment), TextAlignVertical::Center)?;
        host.set_text_auto_resize(node, TextAutoResize::None)?;
        debug!("Text '{}': {} runs, {} chars", name, content.runs.len(), cursor);
        Ok(())
    }

    /// Creates a text node with its default font assigned and its characters set.
    /// The font must already be loaded.
    pub(super) fn create_text_node<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        container: NodeId,
        name: &str,
        font: &FontName,
        characters: &str,
    ) -> HostResult<NodeId> {
        let node = self.spawn(host, container, NodeKind::Text, name)?;
        host.set_font_name(node, None, font)?;
        host.set_characters(node, characters)?;
        Ok(node)
    }

    /// Applies one run's style to its range. Each property is independent: a
    /// rejected property is logged and the others are still applied.
    async fn style_run<H: SceneHost + ?Sized>(&mut self, host: &mut H, node: NodeId, run: &TextRun, range: TextRange) {
        match self
            .fonts
            .resolve(host, &run.font_family, run.font_weight, run.italic)
            .await
        {
            Ok(resolved) => skip_on_error(host.set_font_name(node, Some(range), &resolved.font), "font", range),
            Err(e) => warn!("No font for run {}..{}: {}", range.start, range.end, e),
        }

        let size = scaled_font_size(run.font_size, &self.fit);
        skip_on_error(host.set_font_size(node, Some(range), size), "font size", range);

        let color = run.color.unwrap_or(DEFAULT_TEXT_COLOR);
        skip_on_error(
            host.set_text_fills(node, Some(range), vec![Paint::solid(color)]),
            "color",
            range,
        );

        // The host carries one decoration per range.
        let decoration = if run.underline {
            Some(TextDecoration::Underline)
        } else if run.strikethrough {
            Some(TextDecoration::Strikethrough)
        } else {
            None
        };
        if let Some(decoration) = decoration {
            skip_on_error(host.set_text_decoration(node, range, decoration), "decoration", range);
        }
    }
}

fn skip_on_error(result: HostResult<()>, property: &str, range: TextRange) {
    if let Err(e) = result {
        warn!("Skipping {} for range {}..{}: {}", property, range.start, range.end, e);
    }
}

/// Font size in target units, rounded, never below 1.
pub(super) fn scaled_font_size(size: f64, fit: &FitScale) -> f64 {
    fit.apply(size).round().max(1.0)
}

fn horizontal_alignment(alignment: Alignment) -> TextAlignHorizontal {
    match alignment {
        Alignment::Start => TextAlignHorizontal::Left,
        Alignment::Center => TextAlignHorizontal::Center,
        Alignment::End => TextAlignHorizontal::Right,
        Alignment::Justified => TextAlignHorizontal::Justified,
    }
}
