/// Data layer: core types, loading, and method selection.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TrackTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ TrackTable │  Vec<Track>, column order
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  method's label column → FilteredTable
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod select;
