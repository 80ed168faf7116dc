/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, region/category indices, month span
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply selection → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  grouped revenue sums + metric means
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
