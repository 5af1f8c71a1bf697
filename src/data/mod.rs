/// Data layer: core table types and CSV loading.
///
/// Architecture:
/// ```text
///   raw .csv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → TabularDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ TabularDataset  │  named columns, each Numeric | Textual
///   └────────────────┘
/// ```

pub mod loader;
pub mod model;
