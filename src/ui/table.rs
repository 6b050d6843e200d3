use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CleanTable, TABLE_COLUMNS};

const ROW_HEIGHT: f32 = 18.0;

/// Render the rows at `rows` as a scrollable, striped table.
pub fn volcano_table(ui: &mut Ui, table: &CleanTable, rows: &[usize]) {
    ui.label(format!("{} rows", rows.len()));

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), TABLE_COLUMNS.len())
            .header(20.0, |mut header| {
                for name in TABLE_COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = &table.records[rows[row.index()]];
                    for cell in record.cells() {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
