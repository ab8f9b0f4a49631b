use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

/// Column names of the municipal report table. Every supported container
/// format (CSV, JSON records, Parquet) carries this same schema.
pub mod columns {
    pub const CITY: &str = "City";
    pub const YEAR: &str = "Year";
    pub const CONTAMINANT: &str = "Contaminant";
    pub const AVERAGE_LEVEL: &str = "Average Level";
    pub const MCL_ALLOWED: &str = "MCL Allowed";
    pub const MCLG: &str = "MCLG";

    pub const ALL: [&str; 6] = [CITY, YEAR, CONTAMINANT, AVERAGE_LEVEL, MCL_ALLOWED, MCLG];
}

// ---------------------------------------------------------------------------
// Record – one row of the report table
// ---------------------------------------------------------------------------

/// One measurement: the average level of a contaminant in a city's water
/// supply for a given year, plus the regulatory thresholds in force.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub city: String,
    /// Some exports store the year as text; it is coerced on load and
    /// always compared numerically.
    pub year: i32,
    pub contaminant: String,
    /// Measured average concentration (ppm or ppb depending on contaminant).
    pub average_level: f64,
    /// Maximum Contaminant Level – the enforced legal limit.
    pub mcl_allowed: f64,
    /// Maximum Contaminant Level Goal – the aspirational target.
    pub mclg: f64,
}

// ---------------------------------------------------------------------------
// WaterDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed unique-value indices.
///
/// Loaded once per session and never mutated afterwards; filtering and
/// aggregation derive new values from it.
#[derive(Debug, Clone)]
pub struct WaterDataset {
    /// All rows in source file order.
    pub records: Vec<Record>,
    /// Unique city names, sorted.
    pub cities: Vec<String>,
    /// Unique contaminant names, sorted.
    pub contaminants: Vec<String>,
    /// Unique years, ascending.
    pub years: Vec<i32>,
}

impl WaterDataset {
    /// Build the unique-value indices from the loaded rows.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut cities: BTreeSet<String> = BTreeSet::new();
        let mut contaminants: BTreeSet<String> = BTreeSet::new();
        let mut years: BTreeSet<i32> = BTreeSet::new();

        for rec in &records {
            cities.insert(rec.city.clone());
            contaminants.insert(rec.contaminant.clone());
            years.insert(rec.year);
        }

        WaterDataset {
            records,
            cities: cities.into_iter().collect(),
            contaminants: contaminants.into_iter().collect(),
            years: years.into_iter().collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest year on record, if any rows were loaded.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        match (self.years.first(), self.years.last()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn indices_are_unique_and_sorted() {
        let ds = WaterDataset::from_records(vec![
            rec("Irving", 2023, "Lead"),
            rec("Arlington", 2021, "Nitrate"),
            rec("Irving", 2021, "Lead"),
            rec("Arlington", 2022, "Lead"),
        ]);

        assert_eq!(ds.cities, vec!["Arlington", "Irving"]);
        assert_eq!(ds.contaminants, vec!["Lead", "Nitrate"]);
        assert_eq!(ds.years, vec![2021, 2022, 2023]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn year_bounds_span_the_table() {
        let ds = WaterDataset::from_records(vec![
            rec("Arlington", 2022, "Lead"),
            rec("Arlington", 2019, "Lead"),
        ]);
        assert_eq!(ds.year_bounds(), Some((2019, 2022)));

        let empty = WaterDataset::from_records(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.year_bounds(), None);
    }
}
