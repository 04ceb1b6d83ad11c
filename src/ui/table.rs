use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::FilteredTable;

// ---------------------------------------------------------------------------
// Head-of-table preview
// ---------------------------------------------------------------------------

/// How many rows the dataset overview shows.
pub const PREVIEW_ROWS: usize = 10;

/// Render the first rows of the filtered table, all columns in source order.
pub fn preview_table(ui: &mut Ui, filtered: &FilteredTable) {
    let n_rows = filtered.len().min(PREVIEW_ROWS);

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().resizable(true), filtered.columns.len())
            .header(20.0, |mut header| {
                for col in &filtered.columns {
                    header.col(|ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, n_rows, |mut row| {
                    let track = &filtered.tracks[row.index()];
                    for col in &filtered.columns {
                        row.col(|ui| {
                            let text = track
                                .fields
                                .get(col)
                                .map(|v| v.to_string())
                                .unwrap_or_default();
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
