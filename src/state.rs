use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::{FilterCriteria, filtered_indices};
use crate::data::highlight::HighlightRule;
use crate::data::model::WaterDataset;

// ---------------------------------------------------------------------------
// Viewing modes
// ---------------------------------------------------------------------------

/// The three interchangeable views over the loaded table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Filtered, highlight-annotated table of raw records.
    #[default]
    Normal,
    /// Per-city trend lines over the years, one line per contaminant.
    YearAnalysis,
    /// Per-city bars for one (year, contaminant) pair.
    CityComparison,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::YearAnalysis, Mode::CityComparison];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "Normal Mode",
            Mode::YearAnalysis => "Year Analysis Mode",
            Mode::CityComparison => "City Comparison Mode",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until the user opens a file).
    pub dataset: Option<WaterDataset>,

    /// Currently rendered view.
    pub mode: Mode,

    /// Normal-mode filter selections.
    pub criteria: FilterCriteria,

    /// Normal-mode highlight toggles.
    pub highlight: HighlightRule,

    /// Indices of records passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Year-Analysis city selection.
    pub trend_city: Option<String>,

    /// Year-Analysis contaminant selection; empty charts every contaminant.
    pub trend_contaminants: BTreeSet<String>,

    /// City-Comparison year selection.
    pub comparison_year: Option<i32>,

    /// City-Comparison contaminant selection.
    pub comparison_contaminant: Option<String>,

    /// Stable colour per contaminant (trend lines).
    pub contaminant_colors: ColorMap,

    /// Stable colour per city (comparison bars).
    pub city_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            mode: Mode::default(),
            criteria: FilterCriteria::default(),
            highlight: HighlightRule::default(),
            visible_indices: Vec::new(),
            trend_city: None,
            trend_contaminants: BTreeSet::new(),
            comparison_year: None,
            comparison_contaminant: None,
            contaminant_colors: ColorMap::default(),
            city_colors: ColorMap::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: select everything, seed the per-mode
    /// defaults, and build the colour maps.
    pub fn set_dataset(&mut self, dataset: WaterDataset) {
        self.criteria = FilterCriteria::all_of(&dataset);
        self.highlight = HighlightRule::default();
        self.visible_indices = (0..dataset.len()).collect();

        self.trend_city = dataset.cities.first().cloned();
        self.trend_contaminants = BTreeSet::new();
        self.comparison_year = dataset.years.first().copied();
        self.comparison_contaminant = dataset.contaminants.first().cloned();

        self.contaminant_colors = ColorMap::new(&dataset.contaminants);
        self.city_colors = ColorMap::new(&dataset.cities);

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.criteria);
        }
    }

    /// Store a new year range, swapping the bounds if the user drags them
    /// past each other so the criteria invariant always holds.
    pub fn set_year_range(&mut self, min: i32, max: i32) {
        self.criteria.year_min = min.min(max);
        self.criteria.year_max = max.max(min);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(city: &str, year: i32, contaminant: &str) -> Record {
        Record {
            city: city.to_string(),
            year,
            contaminant: contaminant.to_string(),
            average_level: 1.0,
            mcl_allowed: 2.0,
            mclg: 0.5,
        }
    }

    #[test]
    fn set_dataset_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(WaterDataset::from_records(vec![
            rec("Irving", 2022, "Lead"),
            rec("Arlington", 2021, "Nitrate"),
        ]));

        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.criteria.year_min, 2021);
        assert_eq!(state.criteria.year_max, 2022);
        assert_eq!(state.trend_city.as_deref(), Some("Arlington"));
        assert_eq!(state.comparison_year, Some(2021));
        assert_eq!(state.comparison_contaminant.as_deref(), Some("Lead"));
    }

    #[test]
    fn crossed_year_bounds_are_swapped() {
        let mut state = AppState::default();
        state.set_dataset(WaterDataset::from_records(vec![
            rec("Irving", 2021, "Lead"),
            rec("Irving", 2023, "Lead"),
        ]));

        state.set_year_range(2023, 2021);
        assert_eq!(state.criteria.year_min, 2021);
        assert_eq!(state.criteria.year_max, 2023);
        assert_eq!(state.visible_indices.len(), 2);
    }

    #[test]
    fn refilter_tracks_criteria() {
        let mut state = AppState::default();
        state.set_dataset(WaterDataset::from_records(vec![
            rec("Irving", 2021, "Lead"),
            rec("Irving", 2022, "Lead"),
        ]));

        state.set_year_range(2022, 2022);
        assert_eq!(state.visible_indices, vec![1]);
    }
}
