/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///   nasa.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate name, parse file → RecordTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordTable  │  Vec<Record>, header column order
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  close-approach date >= cutoff → new RecordTable
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
