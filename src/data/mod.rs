/// Data layer: naming convention, loading, and per-instance selection.
///
/// Architecture:
/// ```text
///  test_results/**/[resultados_]<inst>_z<p>_a<alpha>.txt
///        │
///        ▼
///   ┌──────────┐
///   │ filename  │  base name → (instance, zones, alpha)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  body rows → mean / std / mean per file
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SummaryTable  │  Vec<ResultFileRecord>, discovery order
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rows per instance, series per alpha
///   └──────────┘
/// ```

pub mod filename;
pub mod filter;
pub mod loader;
pub mod model;
