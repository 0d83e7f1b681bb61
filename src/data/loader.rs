use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use super::filename::parse_filename;
use super::model::{RawSample, ResultFileRecord, SummaryTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every recognised result file under `root` into one summary table.
///
/// Files whose name does not follow the naming convention, and files with
/// no data rows, are skipped silently. A file that cannot be read or parsed
/// is reported and skipped; the remaining files are still loaded. Only a
/// failure to walk `root` itself is returned as an error.
pub fn load_results(root: &Path) -> Result<SummaryTable> {
    let files = discover_result_files(root)?;
    info!("Found {} result files.", files.len());

    let mut records = Vec::new();
    for path in &files {
        let Some(params) = parse_filename(path) else {
            debug!("Skipping unrecognised file name: {}", path.display());
            continue;
        };

        match read_samples(path) {
            Ok(samples) => {
                if let Some(record) = ResultFileRecord::from_samples(params, &samples) {
                    records.push(record);
                }
            }
            Err(e) => error!("Error reading {}: {e:#}", path.display()),
        }
    }

    info!("Processed {} files successfully.", records.len());
    Ok(SummaryTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Recursively collect `*.txt` files below `root`, in walk order.
///
/// Hidden files and directories below the root are not visited. An entry
/// that cannot be read (dangling symlink, unreadable directory) is reported
/// and skipped; only a failure on `root` itself is an error.
pub fn discover_result_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                let path = e.path().unwrap_or(root).display().to_string();
                error!("Error reading {path}: {e}");
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("walking {}", root.display())),
        };
        if entry.file_type().is_file() && has_txt_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("txt")
}

// ---------------------------------------------------------------------------
// Body parsing
// ---------------------------------------------------------------------------

/// Problems with the body of a single result file.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("line {line}: expected 3 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: '{token}' is not a number")]
    NotANumber { line: usize, token: String },
}

/// Read the data rows of a result file, discarding its first line.
pub fn read_samples(path: &Path) -> Result<Vec<RawSample>> {
    let text = std::fs::read_to_string(path).context("reading result file")?;
    Ok(parse_samples(&text)?)
}

/// Parse a result file body: a header line (run count, ignored) followed by
/// `cost_without cost_with time` rows. Blank lines are ignored.
pub fn parse_samples(text: &str) -> std::result::Result<Vec<RawSample>, SampleError> {
    let mut samples = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(SampleError::FieldCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let num = |token: &str| {
            token.parse::<f64>().map_err(|_| SampleError::NotANumber {
                line: line_no,
                token: token.to_string(),
            })
        };
        num(fields[0])?;
        samples.push(RawSample {
            cost_with: num(fields[1])?,
            time: num(fields[2])?,
        });
    }

    Ok(samples)
}
