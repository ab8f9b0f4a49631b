use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Mode};

// ---------------------------------------------------------------------------
// Left side panel – mode selector and per-mode controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Crystal Clear");
    ui.label("Compare local water quality data from annual municipal reports.");
    ui.separator();

    ui.strong("Mode");
    egui::ComboBox::from_id_salt("mode_select")
        .selected_text(state.mode.label())
        .show_ui(ui, |ui: &mut Ui| {
            for mode in Mode::ALL {
                if ui.selectable_label(state.mode == mode, mode.label()).clicked() {
                    state.mode = mode;
                }
            }
        });
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the rosters so we can mutate state inside the widget closures.
    let cities = dataset.cities.clone();
    let contaminants = dataset.contaminants.clone();
    let years = dataset.years.clone();
    let year_bounds = dataset.year_bounds();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.mode {
            Mode::Normal => normal_controls(ui, state, &cities, &contaminants, year_bounds),
            Mode::YearAnalysis => trend_controls(ui, state, &cities, &contaminants),
            Mode::CityComparison => comparison_controls(ui, state, &years, &contaminants),
        });
}

/// Normal mode: year range, city/contaminant multi-select, highlight toggles.
fn normal_controls(
    ui: &mut Ui,
    state: &mut AppState,
    cities: &[String],
    contaminants: &[String],
    year_bounds: Option<(i32, i32)>,
) {
    let mut changed = false;

    if let Some((lo, hi)) = year_bounds {
        ui.strong("Year");
        let mut min = state.criteria.year_min;
        let mut max = state.criteria.year_max;
        let mut dragged = false;
        ui.horizontal(|ui: &mut Ui| {
            ui.label("from");
            dragged |= ui
                .add(egui::DragValue::new(&mut min).range(lo..=hi))
                .changed();
            ui.label("to");
            dragged |= ui
                .add(egui::DragValue::new(&mut max).range(lo..=hi))
                .changed();
        });
        if dragged {
            state.set_year_range(min, max);
        }
        ui.separator();
    }

    changed |= checkbox_section(ui, "Cities", cities, &mut state.criteria.cities);
    changed |= checkbox_section(ui, "Contaminants", contaminants, &mut state.criteria.contaminants);

    ui.separator();
    ui.strong("Additional Options");
    ui.checkbox(
        &mut state.highlight.flag_exceeds_mcl,
        "Show Average Level > MCL Allowed",
    );
    ui.checkbox(
        &mut state.highlight.flag_exceeds_mclg,
        "Show Average Level > MCLG",
    );

    if changed {
        state.refilter();
    }
}

/// Year Analysis mode: one city, any number of contaminants.
fn trend_controls(ui: &mut Ui, state: &mut AppState, cities: &[String], contaminants: &[String]) {
    ui.strong("City");
    let current = state.trend_city.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("trend_city")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for city in cities {
                if ui.selectable_label(current == *city, city).clicked() {
                    state.trend_city = Some(city.clone());
                }
            }
        });
    ui.separator();

    checkbox_section(ui, "Contaminants", contaminants, &mut state.trend_contaminants);
    ui.weak("No selection charts every contaminant.");
}

/// City Comparison mode: one year, one contaminant.
fn comparison_controls(ui: &mut Ui, state: &mut AppState, years: &[i32], contaminants: &[String]) {
    ui.strong("Year");
    let current_year = state.comparison_year;
    egui::ComboBox::from_id_salt("comparison_year")
        .selected_text(
            current_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
        )
        .show_ui(ui, |ui: &mut Ui| {
            for &year in years {
                if ui
                    .selectable_label(current_year == Some(year), year.to_string())
                    .clicked()
                {
                    state.comparison_year = Some(year);
                }
            }
        });
    ui.separator();

    ui.strong("Contaminant");
    let current = state.comparison_contaminant.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("comparison_contaminant")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for contaminant in contaminants {
                if ui
                    .selectable_label(current == *contaminant, contaminant)
                    .clicked()
                {
                    state.comparison_contaminant = Some(contaminant.clone());
                }
            }
        });
}

/// A collapsible checkbox list over a value roster, with All/None buttons.
/// Returns whether the selection changed.
fn checkbox_section(
    ui: &mut Ui,
    title: &str,
    all_values: &[String],
    selected: &mut BTreeSet<String>,
) -> bool {
    let mut changed = false;

    let header_text = format!("{title}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.iter().cloned().collect();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for value in all_values {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value).changed() {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open water quality report")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records: {} cities, {} contaminants, years {:?}",
                    dataset.len(),
                    dataset.cities.len(),
                    dataset.contaminants.len(),
                    dataset.year_bounds()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
