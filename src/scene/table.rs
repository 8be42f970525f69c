//! Tables: a clipped frame holding a uniform grid of cells.

use log::debug;

use super::constants::{
    DEFAULT_TEXT_COLOR, TABLE_BORDER_COLOR, TABLE_BORDER_WEIGHT, TABLE_CELL_BACKGROUND, TABLE_FONT_FAMILY,
};
use super::{error::Result, place, SceneBuilder};
use crate::cancel::CancelHandle;
use crate::geometry::TargetBox;
use crate::host::{NodeId, NodeKind, Paint, SceneHost, TextAlignHorizontal, TextAlignVertical, TextAutoResize};
use crate::models::table::Table;

impl<'a> SceneBuilder<'a> {
    /// Draws a table as an invisible, clipped frame with one bordered
    /// rectangle per cell and a text node for every non-blank cell.
    ///
    /// The grid comes from the cell data: rows are the number of rows, columns
    /// the widest row. Declared row and column counts are ignored.
    /// Cancellation is checked before each row; rows already drawn stay.
    pub(super) async fn materialize_table<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: NodeId,
        name: &str,
        table: &Table,
        target: &TargetBox,
        cancel: &CancelHandle,
    ) -> Result<()> {
        let frame = self.spawn(host, container, NodeKind::Frame, name)?;
        place(host, frame, target)?;
        host.set_fills(frame, Vec::new())?;
        host.set_clips_content(frame, true)?;

        let (rows, columns) = (table.row_count(), table.column_count());
        if rows == 0 || columns == 0 {
            debug!("Table '{}' has no cells", name);
            return Ok(());
        }
        let cell_width = target.width / columns as f64;
        let cell_height = target.height / rows as f64;

        for row in 0..rows {
            if cancel.is_cancelled() {
                debug!("Table '{}' stopped after {} of {} rows", name, row, rows);
                return Ok(());
            }
            for column in 0..columns {
                let cell_name = format!("{} r{}c{}", name, row, column);
                let cell_box = TargetBox {
                    x: column as f64 * cell_width,
                    y: row as f64 * cell_height,
                    width: cell_width,
                    height: cell_height,
                    rotation: 0.0,
                };

                let cell = self.spawn(host, frame, NodeKind::Rectangle, &cell_name)?;
                place(host, cell, &cell_box)?;
                host.set_fills(cell, vec![Paint::solid(TABLE_CELL_BACKGROUND)])?;
                host.set_strokes(cell, vec![Paint::solid(TABLE_BORDER_COLOR)], TABLE_BORDER_WEIGHT)?;

                let text = table.cell_text(row, column).trim();
                if text.is_empty() {
                    continue;
                }
                self.materialize_cell_text(host, frame, &cell_name, text, &cell_box).await?;
            }
        }
        debug!("Table '{}': {} x {} cells", name, rows, columns);
        Ok(())
    }

    async fn materialize_cell_text<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        frame: NodeId,
        cell_name: &str,
        text: &str,
        cell_box: &TargetBox,
    ) -> Result<()> {
        let font = self.fonts.resolve(host, TABLE_FONT_FAMILY, 400, false).await?;
        let node = self.create_text_node(host, frame, &format!("{} text", cell_name), &font.font, text)?;
        host.set_font_size(node, None, self.options.table_font_size)?;
        host.set_text_fills(node, None, vec![Paint::solid(DEFAULT_TEXT_COLOR)])?;
        host.set_text_truncation(node, true)?;
        host.set_text_auto_resize(node, TextAutoResize::None)?;
        place(host, node, &cell_box.inset(self.options.table_cell_padding))?;
        host.set_text_align(node, TextAlignHorizontal::Left, TextAlignVertical::Center)?;
        Ok(())
    }
}
