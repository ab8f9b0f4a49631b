use std::collections::{BTreeMap, BTreeSet};

use super::model::WaterDataset;

// ---------------------------------------------------------------------------
// Chart-ready projections for the two analysis modes
// ---------------------------------------------------------------------------

/// One vertex of a trend line.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub level: f64,
}

/// Average level of one contaminant in one city over the years on record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub contaminant: String,
    pub points: Vec<TrendPoint>,
}

/// One bar of the city-comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBar {
    pub city: String,
    pub level: f64,
}

/// Year-Analysis projection: one series per contaminant measured in `city`.
///
/// A non-empty `contaminants` set restricts the series to its members; an
/// empty set charts every contaminant on record for the city. Series are
/// ordered by contaminant name (the legend order) and points by year, with
/// source order kept for equal years. Years are discrete ticks on the chart,
/// never interpolated. No matching rows yields an empty vec, not an error.
pub fn trend_series(
    dataset: &WaterDataset,
    city: &str,
    contaminants: &BTreeSet<String>,
) -> Vec<TrendSeries> {
    let mut by_contaminant: BTreeMap<&str, Vec<TrendPoint>> = BTreeMap::new();

    for rec in &dataset.records {
        if rec.city != city {
            continue;
        }
        if !contaminants.is_empty() && !contaminants.contains(&rec.contaminant) {
            continue;
        }
        by_contaminant
            .entry(rec.contaminant.as_str())
            .or_default()
            .push(TrendPoint {
                year: rec.year,
                level: rec.average_level,
            });
    }

    by_contaminant
        .into_iter()
        .map(|(contaminant, mut points)| {
            points.sort_by_key(|p| p.year);
            TrendSeries {
                contaminant: contaminant.to_string(),
                points,
            }
        })
        .collect()
}

/// City-Comparison projection: one bar per row matching `year` and
/// `contaminant`, in source encounter order. Empty input or no matches
/// yields an empty vec.
pub fn comparison_bars(dataset: &WaterDataset, year: i32, contaminant: &str) -> Vec<ComparisonBar> {
    dataset
        .records
        .iter()
        .filter(|rec| rec.year == year && rec.contaminant == contaminant)
        .map(|rec| ComparisonBar {
            city: rec.city.clone(),
            level: rec.average_level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(city: &str, year: i32, contaminant: &str, level: f64) -> Record {
        Record {
            city: city.to_string(),
            year,
            contaminant: contaminant.to_string(),
            average_level: level,
            mcl_allowed: 15.0,
            mclg: 0.0,
        }
    }

    fn sample_dataset() -> WaterDataset {
        // 2022 before 2021 so year sorting is actually exercised.
        WaterDataset::from_records(vec![
            rec("Arlington", 2022, "Lead", 20.0),
            rec("Arlington", 2021, "Lead", 5.0),
            rec("Irving", 2022, "Lead", 10.0),
            rec("Arlington", 2021, "Nitrate", 3.0),
        ])
    }

    #[test]
    fn trend_orders_points_by_year() {
        let ds = sample_dataset();
        let series = trend_series(&ds, "Arlington", &BTreeSet::new());

        assert_eq!(series.len(), 2);
        let lead = &series[0];
        assert_eq!(lead.contaminant, "Lead");
        assert_eq!(
            lead.points,
            vec![
                TrendPoint { year: 2021, level: 5.0 },
                TrendPoint { year: 2022, level: 20.0 },
            ]
        );
    }

    #[test]
    fn trend_restricts_to_selected_contaminants() {
        let ds = sample_dataset();
        let selected: BTreeSet<String> = ["Nitrate".to_string()].into_iter().collect();
        let series = trend_series(&ds, "Arlington", &selected);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].contaminant, "Nitrate");
        assert_eq!(series[0].points.len(), 1);
    }

    #[test]
    fn comparison_keeps_encounter_order() {
        let ds = sample_dataset();
        let bars = comparison_bars(&ds, 2022, "Lead");

        assert_eq!(
            bars,
            vec![
                ComparisonBar { city: "Arlington".to_string(), level: 20.0 },
                ComparisonBar { city: "Irving".to_string(), level: 10.0 },
            ]
        );
    }

    #[test]
    fn empty_input_is_stable() {
        let empty = WaterDataset::from_records(Vec::new());
        assert!(trend_series(&empty, "Arlington", &BTreeSet::new()).is_empty());
        assert!(comparison_bars(&empty, 2022, "Lead").is_empty());
    }

    #[test]
    fn unknown_selection_yields_empty() {
        let ds = sample_dataset();
        assert!(trend_series(&ds, "Dallas", &BTreeSet::new()).is_empty());
        assert!(comparison_bars(&ds, 1999, "Lead").is_empty());
    }
}
