/// Data layer: core types, loading/cleaning, caching, and selection filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  path → Arc<Dataset>, never invalidated
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  vehicle selection → FilteredView
///   └──────────┘
/// ```
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
