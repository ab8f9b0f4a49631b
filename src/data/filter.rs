use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{Record, WaterDataset};

// ---------------------------------------------------------------------------
// Filter criteria: the Normal-mode predicates
// ---------------------------------------------------------------------------

/// User-selected predicates for the table view.
///
/// The three dimensions are independent and combine with logical AND. An
/// empty city or contaminant set places no restriction on that dimension;
/// selected values absent from the table simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive lower year bound.
    pub year_min: i32,
    /// Inclusive upper year bound.
    pub year_max: i32,
    pub cities: BTreeSet<String>,
    pub contaminants: BTreeSet<String>,
}

/// An inverted year range, rejected at construction.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid year range: {min} > {max}")]
pub struct InvalidYearRange {
    pub min: i32,
    pub max: i32,
}

impl FilterCriteria {
    /// Build criteria, failing fast on `year_min > year_max`.
    pub fn new(
        year_min: i32,
        year_max: i32,
        cities: BTreeSet<String>,
        contaminants: BTreeSet<String>,
    ) -> Result<Self, InvalidYearRange> {
        if year_min > year_max {
            return Err(InvalidYearRange {
                min: year_min,
                max: year_max,
            });
        }
        Ok(FilterCriteria {
            year_min,
            year_max,
            cities,
            contaminants,
        })
    }

    /// Criteria matching every row of the given dataset: full year range,
    /// every city and contaminant selected.
    pub fn all_of(dataset: &WaterDataset) -> Self {
        let (year_min, year_max) = dataset.year_bounds().unwrap_or((0, 0));
        FilterCriteria {
            year_min,
            year_max,
            cities: dataset.cities.iter().cloned().collect(),
            contaminants: dataset.contaminants.iter().cloned().collect(),
        }
    }

    /// Whether a single record passes all three dimensions.
    pub fn matches(&self, rec: &Record) -> bool {
        if rec.year < self.year_min || rec.year > self.year_max {
            return false;
        }
        if !self.cities.is_empty() && !self.cities.contains(&rec.city) {
            return false;
        }
        if !self.contaminants.is_empty() && !self.contaminants.contains(&rec.contaminant) {
            return false;
        }
        true
    }
}

/// Return indices of records passing all criteria.
///
/// The output is stable: indices are strictly increasing, so the visible
/// rows keep the source file order. An empty result is a normal outcome,
/// not an error.
pub fn filtered_indices(dataset: &WaterDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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
        WaterDataset::from_records(vec![
            rec("Arlington", 2021, "Lead", 5.0),
            rec("Arlington", 2022, "Lead", 20.0),
            rec("Irving", 2022, "Lead", 10.0),
            rec("Irving", 2023, "Nitrate", 3.0),
            rec("Fort Worth", 2021, "Nitrate", 8.0),
        ])
    }

    fn criteria(
        years: (i32, i32),
        cities: &[&str],
        contaminants: &[&str],
    ) -> FilterCriteria {
        FilterCriteria::new(
            years.0,
            years.1,
            cities.iter().map(|s| s.to_string()).collect(),
            contaminants.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    fn apply(ds: &WaterDataset, c: &FilterCriteria) -> Vec<Record> {
        filtered_indices(ds, c)
            .into_iter()
            .map(|i| ds.records[i].clone())
            .collect()
    }

    #[test]
    fn all_dimensions_and_together() {
        let ds = sample_dataset();
        let c = criteria((2021, 2022), &["Arlington"], &[]);
        let out = apply(&ds, &c);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.city == "Arlington"));
    }

    #[test]
    fn empty_set_means_no_restriction() {
        let ds = sample_dataset();
        let c = criteria((2021, 2023), &[], &[]);
        assert_eq!(filtered_indices(&ds, &c).len(), ds.len());
    }

    #[test]
    fn absent_city_yields_empty_not_error() {
        let ds = sample_dataset();
        let c = criteria((2021, 2023), &["Dallas"], &[]);
        assert!(filtered_indices(&ds, &c).is_empty());
    }

    #[test]
    fn output_preserves_source_order() {
        let ds = sample_dataset();
        let c = criteria((2021, 2023), &[], &["Lead"]);
        assert_eq!(filtered_indices(&ds, &c), vec![0, 1, 2]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = FilterCriteria::new(2023, 2021, BTreeSet::new(), BTreeSet::new())
            .unwrap_err();
        assert_eq!(err, InvalidYearRange { min: 2023, max: 2021 });
    }

    #[test]
    fn filter_is_idempotent() {
        let ds = sample_dataset();
        let c = criteria((2021, 2022), &["Arlington", "Irving"], &["Lead"]);

        let once = apply(&ds, &c);
        let again = apply(&WaterDataset::from_records(once.clone()), &c);
        assert_eq!(once, again);
    }

    #[test]
    fn widening_any_dimension_is_monotone() {
        let ds = sample_dataset();
        let narrow = criteria((2022, 2022), &["Arlington"], &["Lead"]);
        let base = filtered_indices(&ds, &narrow).len();

        let wider_years = criteria((2021, 2023), &["Arlington"], &["Lead"]);
        let wider_cities = criteria((2022, 2022), &["Arlington", "Irving"], &["Lead"]);
        let wider_contaminants = criteria((2022, 2022), &["Arlington"], &["Lead", "Nitrate"]);

        assert!(filtered_indices(&ds, &wider_years).len() >= base);
        assert!(filtered_indices(&ds, &wider_cities).len() >= base);
        assert!(filtered_indices(&ds, &wider_contaminants).len() >= base);
    }

    #[test]
    fn combined_filter_equals_intersection_of_dimensions() {
        let ds = sample_dataset();
        let combined = criteria((2021, 2022), &["Arlington", "Irving"], &["Lead"]);

        let by_year = filtered_indices(&ds, &criteria((2021, 2022), &[], &[]));
        let by_city = filtered_indices(&ds, &criteria((i32::MIN, i32::MAX), &["Arlington", "Irving"], &[]));
        let by_contaminant = filtered_indices(&ds, &criteria((i32::MIN, i32::MAX), &[], &["Lead"]));

        let intersection: Vec<usize> = (0..ds.len())
            .filter(|i| by_year.contains(i) && by_city.contains(i) && by_contaminant.contains(i))
            .collect();

        assert_eq!(filtered_indices(&ds, &combined), intersection);
    }
}
