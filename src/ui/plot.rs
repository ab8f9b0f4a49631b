use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::data::aggregate::{comparison_bars, trend_series};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Year Analysis – trend lines (central panel)
// ---------------------------------------------------------------------------

/// Render the per-city trend chart: one line per contaminant, years as
/// discrete ordered ticks.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        open_file_hint(ui);
        return;
    };
    let Some(city) = state.trend_city.as_deref() else {
        no_data_hint(ui);
        return;
    };

    let series = trend_series(dataset, city, &state.trend_contaminants);
    if series.is_empty() {
        no_data_hint(ui);
        return;
    }

    // Ordinal x axis: the distinct years present, mapped to tick positions
    // 0..n in ascending order. Missing years get no tick and no gap.
    let mut years: Vec<i32> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.year))
        .collect();
    years.sort_unstable();
    years.dedup();
    let tick_of = |year: i32| years.binary_search(&year).unwrap_or_default() as f64;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(format!(
            "Change in Average Level of Contaminants in {city} by Year"
        ));
    });

    let tick_labels = years.clone();
    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Average Level (ppm/ppb)")
        .x_axis_formatter(move |mark, _range| ordinal_label(&tick_labels, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in &series {
                let color = state.contaminant_colors.color_for(&s.contaminant);
                let points: PlotPoints = s
                    .points
                    .iter()
                    .map(|p| [tick_of(p.year), p.level])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .name(&s.contaminant)
                        .color(color)
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// City Comparison – bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the per-city comparison chart for the selected year and
/// contaminant. The city axis already names every bar, so there is no
/// legend.
pub fn comparison_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        open_file_hint(ui);
        return;
    };
    let (Some(year), Some(contaminant)) =
        (state.comparison_year, state.comparison_contaminant.as_deref())
    else {
        no_data_hint(ui);
        return;
    };

    let bars = comparison_bars(dataset, year, contaminant);
    if bars.is_empty() {
        no_data_hint(ui);
        return;
    }

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(format!("Average Level of {contaminant} in {year} by City"));
    });

    let labels: Vec<String> = bars.iter().map(|b| b.city.clone()).collect();
    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.level)
                .name(&b.city)
                .fill(state.city_colors.color_for(&b.city))
                .width(0.6)
        })
        .collect();

    Plot::new("comparison_plot")
        .x_axis_label("City")
        .y_axis_label("Average Level (ppm/ppb)")
        .x_axis_formatter(move |mark, _range| categorical_label(&labels, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars));
        });
}

// ---------------------------------------------------------------------------
// Axis and empty-state helpers
// ---------------------------------------------------------------------------

/// Label a grid mark with the year at that tick position; fractional marks
/// between ticks stay unlabeled.
fn ordinal_label(years: &[i32], position: f64) -> String {
    match tick_index(years.len(), position) {
        Some(i) => years[i].to_string(),
        None => String::new(),
    }
}

/// Label a grid mark with the category at that tick position.
fn categorical_label(labels: &[String], position: f64) -> String {
    match tick_index(labels.len(), position) {
        Some(i) => labels[i].clone(),
        None => String::new(),
    }
}

fn tick_index(len: usize, position: f64) -> Option<usize> {
    if position < 0.0 || position.fract() != 0.0 {
        return None;
    }
    let i = position as usize;
    (i < len).then_some(i)
}

fn open_file_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a water quality report to begin  (File → Open…)");
    });
}

fn no_data_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label("No measurements match the current selection.");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels_only_on_whole_positions() {
        let years = vec![2021, 2022, 2023];
        assert_eq!(ordinal_label(&years, 0.0), "2021");
        assert_eq!(ordinal_label(&years, 2.0), "2023");
        assert_eq!(ordinal_label(&years, 1.5), "");
        assert_eq!(ordinal_label(&years, -1.0), "");
        assert_eq!(ordinal_label(&years, 3.0), "");
    }
}
