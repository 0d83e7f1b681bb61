//! Fixed run settings.
//!
//! The tool takes no arguments and reads no configuration file; everything
//! it needs to know lives here.

use std::path::PathBuf;

/// Input and output locations for one pipeline run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory scanned recursively for solver result files.
    pub results_root: PathBuf,
    /// Directory receiving one PNG per instance.
    pub chart_dir: PathBuf,
    /// Summary table export.
    pub summary_csv: PathBuf,
    /// Size of each chart image in pixels (both panels).
    pub canvas_size: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("test_results"),
            chart_dir: PathBuf::from("graficos").join("medianos"),
            summary_csv: PathBuf::from("resumen_experimentos_medianos.csv"),
            canvas_size: (1500, 600),
        }
    }
}
