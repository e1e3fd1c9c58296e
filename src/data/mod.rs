/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   data/*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  list CSV files in the data folder
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ObservationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ ObservationTable  │  Vec<Observation>, city index
///   └──────────────────┘
///        │  SelectionCriteria
///        ▼
///   ┌──────────┐
///   │  filter   │  cities + date range → FilteredTable (row indices)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  series   │   │ summary   │  per-city chart points / per-city means
///   └──────────┘   └──────────┘
/// ```
/// `pipeline` drives filter → series → summary for one interaction.

pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod series;
pub mod source;
pub mod summary;
