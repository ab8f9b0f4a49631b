use eframe::egui;

use crate::state::{AppState, Mode};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CrystalClearApp {
    pub state: AppState,
}

impl Default for CrystalClearApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for CrystalClearApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: mode + controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.mode {
            Mode::Normal => table::annotated_table(ui, &self.state),
            Mode::YearAnalysis => plot::trend_plot(ui, &self.state),
            Mode::CityComparison => plot::comparison_plot(ui, &self.state),
        });
    }
}
