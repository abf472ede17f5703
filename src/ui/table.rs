use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Underlying-data table (below the chart)
// ---------------------------------------------------------------------------

/// Render the filtered records as a table: vehicle, kmpl, fuel consumed,
/// created date.  Missing timestamps render as "–".
pub fn data_table(ui: &mut Ui, state: &AppState, dataset: &Dataset) {
    let indices = state.view.indices();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Vehicle", "KMPL", "Fuel consumed", "Created"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let record = &dataset.records[indices[row.index()]];
                row.col(|ui| {
                    ui.label(&record.vehicle_id);
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", record.kmpl));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", record.fuel_consumed));
                });
                row.col(|ui| {
                    let text = record
                        .created_at
                        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "–".to_string());
                    ui.label(text);
                });
            });
        });
}
