use eframe::egui::Ui;
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use crate::data::model::Dataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// KMPL vs fuel-consumed chart (central panel)
// ---------------------------------------------------------------------------

/// Render the line chart for the current filtered view: x = kmpl,
/// y = estimated fuel consumed, one series per selected vehicle.
pub fn consumption_plot(ui: &mut Ui, state: &AppState, dataset: &Dataset) {
    Plot::new("consumption_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Last Transaction (KMPL)")
        .y_axis_label("Estimated Fuel Consumed")
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("kmpl = {:.2}\nfuel = {:.2}", value.x, value.y)
            } else {
                format!("{name}\nkmpl = {:.2}\nfuel = {:.2}", value.x, value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Rows are sorted by vehicle id, so each series is a contiguous
            // run of indices.
            let indices = state.view.indices();
            let mut start = 0;
            while start < indices.len() {
                let vehicle = &dataset.records[indices[start]].vehicle_id;
                let end = indices[start..]
                    .iter()
                    .position(|&i| dataset.records[i].vehicle_id != *vehicle)
                    .map(|off| start + off)
                    .unwrap_or(indices.len());

                let color = state.colors.color_for(vehicle);
                let series: Vec<[f64; 2]> = indices[start..end]
                    .iter()
                    .map(|&i| {
                        let r = &dataset.records[i];
                        [r.kmpl, r.fuel_consumed]
                    })
                    .collect();

                let points: PlotPoints = series.clone().into();
                plot_ui.line(Line::new(points).name(vehicle).color(color).width(1.5));

                let markers: PlotPoints = series.into();
                plot_ui.points(
                    Points::new(markers)
                        .name(vehicle)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(2.5),
                );

                start = end;
            }
        });
}
