use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::highlight_tint;
use crate::data::highlight::classify;
use crate::data::model::columns;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Normal mode – annotated record table (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered table, each row tinted by its highlight
/// classification. Highlighting only marks rows; filtering decides which
/// rows appear at all.
pub fn annotated_table(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a water quality report to begin  (File → Open…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Database of Municipal Water Quality");
    });
    ui.add_space(4.0);

    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No records match the current filters.");
        });
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(80.0), columns::ALL.len())
        .header(20.0, |mut header| {
            for title in columns::ALL {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let rec = &dataset.records[state.visible_indices[row.index()]];
                let tint = highlight_tint(classify(rec, &state.highlight));

                let cell = |text: String| match tint {
                    Some(color) => RichText::new(text).color(color),
                    None => RichText::new(text),
                };

                row.col(|ui: &mut Ui| {
                    ui.label(cell(rec.city.clone()));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(cell(rec.year.to_string()));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(cell(rec.contaminant.clone()));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(cell(format!("{:.4}", rec.average_level)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(cell(format!("{:.4}", rec.mcl_allowed)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(cell(format!("{:.4}", rec.mclg)));
                });
            });
        });

    ui.add_space(8.0);
    ui.weak(
        "MCL: Maximum Contaminant Level Allowed (regulated by the federal government)\n\
         MCLG: Maximum Contaminant Level Goal (aspirational target)",
    );
}
