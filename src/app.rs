use anyhow::{Context, Result};
use log::info;

use crate::config::Settings;
use crate::data::loader::load_results;
use crate::export::write_summary_csv;
use crate::render::plot_by_instance;

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No recognised result file had data; nothing was written.
    NoData,
    /// Charts and summary CSV were written.
    Exported { rows: usize, charts: usize },
}

/// Load → plot → export, using the locations in `settings`.
pub fn run(settings: &Settings) -> Result<RunOutcome> {
    let table = load_results(&settings.results_root)
        .with_context(|| format!("loading results from {}", settings.results_root.display()))?;

    if table.is_empty() {
        info!(
            "No valid data found in {}/ (summary table is empty).",
            settings.results_root.display()
        );
        return Ok(RunOutcome::NoData);
    }

    let charts = plot_by_instance(&table, &settings.chart_dir, settings.canvas_size)
        .context("rendering charts")?;
    write_summary_csv(&table, &settings.summary_csv)?;
    info!("\nSummary table saved to '{}'", settings.summary_csv.display());

    Ok(RunOutcome::Exported {
        rows: table.len(),
        charts: charts.len(),
    })
}
