/// Data layer: core types, loading, filtering, and chart projections.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WaterDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ WaterDataset  │  Vec<Record>, unique-value indices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌───────────┐     ┌────────────┐
///   │  filter   │     │ highlight │     │ aggregate  │
///   └──────────┘     └───────────┘     └────────────┘
///    visible rows     per-row kind      chart series
/// ```

pub mod aggregate;
pub mod filter;
pub mod highlight;
pub mod loader;
pub mod model;
