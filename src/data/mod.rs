/// Data layer: catalog types, loading, normalization, filtering and the
/// aggregates drawn by the dashboard.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → RawTable (untyped cells)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  defaults, dates, durations → Catalog (read-only)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec predicates → FilteredView (indices)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate  │  │  export   │
///   └───────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod dates;
pub mod duration;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
