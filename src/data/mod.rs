/// Data layer: core types, loading, and classification.
///
/// Architecture:
/// ```text
///  .csv / .xls / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (declared kind per column)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Column>, uniform row count
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  partition columns → categorical / continuous /
///   └──────────┘  discrete / temporal
/// ```
pub mod classify;
pub mod loader;
pub mod model;
pub mod upload;
