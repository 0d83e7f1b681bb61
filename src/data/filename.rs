//! Result file naming convention.
//!
//! The solver writes one file per parameter combination, named
//! `[resultados_]<instance>_z<zones>_a<alpha>.txt`. The prefix sometimes
//! lives on the parent directory instead, so it is optional here.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::model::RunParams;

/// Greedy instance capture: the last `_z<digits>_a<number>.txt` suffix wins.
static RESULT_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:resultados_)?(.+)_z(\d+)_a([\d.]+)\.txt$").unwrap()
});

/// Extract `(instance, zones, alpha)` from the base name of `path`.
///
/// Returns `None` for any name that does not follow the convention,
/// including numbers that fail to parse (`_a...`, zones beyond `u32`).
pub fn parse_filename(path: &Path) -> Option<RunParams> {
    let name = path.file_name()?.to_str()?;
    let caps = RESULT_FILE_NAME.captures(name)?;

    let zones = caps[2].parse::<u32>().ok()?;
    let alpha = caps[3].parse::<f64>().ok()?;

    Some(RunParams {
        instance: caps[1].to_string(),
        zones,
        alpha,
    })
}
