use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::{DataType, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Record, WaterDataset, columns};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a water-quality report table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the `City, Year, Contaminant, Average Level,
///   MCL Allowed, MCLG` columns (extra columns are ignored)
/// * `.json`    – records-oriented array with the same keys
/// * `.parquet` – flat scalar columns of the same names
pub fn load_file(path: &Path) -> Result<WaterDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Coerce a year cell to an integer.
///
/// Municipal exports often store `Year` as text; comparing it as text would
/// order "9" after "10", so the value is always parsed before any range
/// check or axis placement.
fn parse_year(s: &str) -> Result<i32> {
    let trimmed = s.trim();
    trimmed
        .parse::<i32>()
        .with_context(|| format!("'{trimmed}' is not a valid year"))
}

fn parse_level(s: &str, column: &str) -> Result<f64> {
    let trimmed = s.trim();
    trimmed
        .parse::<f64>()
        .with_context(|| format!("{column}: '{trimmed}' is not a number"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<WaterDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    parse_csv(reader)
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<WaterDataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let city_idx = column(columns::CITY)?;
    let year_idx = column(columns::YEAR)?;
    let contaminant_idx = column(columns::CONTAMINANT)?;
    let level_idx = column(columns::AVERAGE_LEVEL)?;
    let mcl_idx = column(columns::MCL_ALLOWED)?;
    let mclg_idx = column(columns::MCLG)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        records.push(Record {
            city: cell(city_idx).trim().to_string(),
            year: parse_year(cell(year_idx)).with_context(|| format!("CSV row {row_no}"))?,
            contaminant: cell(contaminant_idx).trim().to_string(),
            average_level: parse_level(cell(level_idx), columns::AVERAGE_LEVEL)
                .with_context(|| format!("CSV row {row_no}"))?,
            mcl_allowed: parse_level(cell(mcl_idx), columns::MCL_ALLOWED)
                .with_context(|| format!("CSV row {row_no}"))?,
            mclg: parse_level(cell(mclg_idx), columns::MCLG)
                .with_context(|| format!("CSV row {row_no}"))?,
        });
    }

    Ok(WaterDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "City": "Arlington",
///     "Year": "2021",
///     "Contaminant": "Lead",
///     "Average Level": 5.0,
///     "MCL Allowed": 15.0,
///     "MCLG": 0.0
///   },
///   ...
/// ]
/// ```
#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Year")]
    year: RawYear,
    #[serde(rename = "Contaminant")]
    contaminant: String,
    #[serde(rename = "Average Level")]
    average_level: f64,
    #[serde(rename = "MCL Allowed")]
    mcl_allowed: f64,
    #[serde(rename = "MCLG")]
    mclg: f64,
}

/// `Year` is text in pandas exports and numeric in hand-written files;
/// both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Number(i32),
    Text(String),
}

impl RawYear {
    fn resolve(self) -> Result<i32> {
        match self {
            RawYear::Number(year) => Ok(year),
            RawYear::Text(text) => parse_year(&text),
        }
    }
}

fn load_json(path: &Path) -> Result<WaterDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<WaterDataset> {
    let raw: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;

    let mut records = Vec::with_capacity(raw.len());
    for (row_no, rec) in raw.into_iter().enumerate() {
        records.push(Record {
            city: rec.city,
            year: rec
                .year
                .resolve()
                .with_context(|| format!("JSON row {row_no}"))?,
            contaminant: rec.contaminant,
            average_level: rec.average_level,
            mcl_allowed: rec.mcl_allowed,
            mclg: rec.mclg,
        });
    }

    Ok(WaterDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the report table.
///
/// Expected schema: flat scalar columns named as in [`columns`]. `Year` may
/// be Utf8 or integer typed; the level columns may be any numeric type.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<WaterDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let city_col = batch.column(column_index(&schema, columns::CITY)?);
        let year_col = batch.column(column_index(&schema, columns::YEAR)?);
        let contaminant_col = batch.column(column_index(&schema, columns::CONTAMINANT)?);
        let level_col = batch.column(column_index(&schema, columns::AVERAGE_LEVEL)?);
        let mcl_col = batch.column(column_index(&schema, columns::MCL_ALLOWED)?);
        let mclg_col = batch.column(column_index(&schema, columns::MCLG)?);

        for row in 0..batch.num_rows() {
            records.push(Record {
                city: string_value(city_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{}'", columns::CITY))?,
                year: year_value(year_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{}'", columns::YEAR))?,
                contaminant: string_value(contaminant_col, row).with_context(|| {
                    format!("Row {row}: failed to read '{}'", columns::CONTAMINANT)
                })?,
                average_level: f64_value(level_col, row).with_context(|| {
                    format!("Row {row}: failed to read '{}'", columns::AVERAGE_LEVEL)
                })?,
                mcl_allowed: f64_value(mcl_col, row).with_context(|| {
                    format!("Row {row}: failed to read '{}'", columns::MCL_ALLOWED)
                })?,
                mclg: f64_value(mclg_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{}'", columns::MCLG))?,
            });
        }
    }

    Ok(WaterDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column_index(schema: &Schema, name: &str) -> Result<usize> {
    schema
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
}

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn string_value(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("expected a string column, got {other:?}"),
    }
}

/// Extract a numeric cell, widening any supported type to `f64`.
fn f64_value(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as f64)
        }
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

/// Extract a year cell from an integer or string column.
fn year_value(col: &Arc<dyn Array>, row: usize) -> Result<i32> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            let value = arr.value(row);
            i32::try_from(value).with_context(|| format!("year {value} out of range"))
        }
        DataType::Utf8 | DataType::LargeUtf8 => parse_year(&string_value(col, row)?),
        other => bail!("expected an integer or string year column, got {other:?}"),
    }
}
