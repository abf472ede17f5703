use eframe::egui;

use crate::data::filter::FilteredView;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FuelExplorerApp {
    pub state: AppState,
}

impl eframe::App for FuelExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: vehicle selection ----
        egui::SidePanel::left("vehicle_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart + table, or state messaging ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let dataset = match &self.state.dataset {
                Some(ds) => ds.clone(),
                None => {
                    ui.centered_and_justified(|ui: &mut egui::Ui| {
                        ui.heading("Open a file to explore fuel data  (File → Open…)");
                    });
                    return;
                }
            };

            match &self.state.view {
                FilteredView::NoSelection => {
                    ui.centered_and_justified(|ui: &mut egui::Ui| {
                        ui.label("Select one or more vehicles to get started.");
                    });
                }
                FilteredView::NoMatches => {
                    ui.centered_and_justified(|ui: &mut egui::Ui| {
                        ui.label("No records found for the selected vehicles.");
                    });
                }
                FilteredView::Rows(_) => {
                    let plot_height = ui.available_height() * 0.6;
                    ui.allocate_ui(
                        egui::vec2(ui.available_width(), plot_height),
                        |ui: &mut egui::Ui| {
                            plot::consumption_plot(ui, &self.state, &dataset);
                        },
                    );
                    ui.separator();
                    ui.strong("Underlying Data");
                    table::data_table(ui, &self.state, &dataset);
                }
            }
        });
    }
}
