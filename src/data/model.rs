use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// RunParams – what a result file name encodes
// ---------------------------------------------------------------------------

/// Experiment parameters recovered from a result file name.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    /// Problem instance / map identifier.
    pub instance: String,
    /// Number of zones (`p`).
    pub zones: u32,
    /// Weighting parameter of the solver.
    pub alpha: f64,
}

// ---------------------------------------------------------------------------
// RawSample – one body line of a result file
// ---------------------------------------------------------------------------

/// One solver run: the with-treatment cost and elapsed time of a data line.
/// The leading without-treatment column is validated but not kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub cost_with: f64,
    pub time: f64,
}

// ---------------------------------------------------------------------------
// ResultFileRecord – one row of the summary table
// ---------------------------------------------------------------------------

/// Per-file summary. Column names match the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFileRecord {
    #[serde(rename = "Instancia")]
    pub instance: String,
    #[serde(rename = "Zonas")]
    pub zones: u32,
    #[serde(rename = "Alpha")]
    pub alpha: f64,
    #[serde(
        rename = "Costo_Promedio",
        serialize_with = "nan_as_empty",
        deserialize_with = "empty_as_nan"
    )]
    pub avg_cost: f64,
    /// Sample standard deviation; `NaN` when the file held a single run.
    #[serde(
        rename = "Costo_Std",
        serialize_with = "nan_as_empty",
        deserialize_with = "empty_as_nan"
    )]
    pub cost_std: f64,
    #[serde(
        rename = "Tiempo_Promedio",
        serialize_with = "nan_as_empty",
        deserialize_with = "empty_as_nan"
    )]
    pub avg_time: f64,
}

impl ResultFileRecord {
    /// Summarise the samples of one file. Returns `None` for an empty body.
    pub fn from_samples(params: RunParams, samples: &[RawSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let costs: Vec<f64> = samples.iter().map(|s| s.cost_with).collect();
        let times: Vec<f64> = samples.iter().map(|s| s.time).collect();

        Some(ResultFileRecord {
            instance: params.instance,
            zones: params.zones,
            alpha: params.alpha,
            avg_cost: mean(&costs),
            cost_std: sample_std(&costs),
            avg_time: mean(&times),
        })
    }

    pub fn alpha_key(&self) -> AlphaKey {
        AlphaKey(self.alpha)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with an N-1 denominator.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

// -- CSV helpers: an undefined value is an empty field, not the text `NaN` --

fn nan_as_empty<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_nan() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_f64(*value)
    }
}

fn empty_as_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// AlphaKey – totally ordered alpha for grouping
// ---------------------------------------------------------------------------

/// Alpha value usable as a `BTreeMap` / `BTreeSet` key.
#[derive(Debug, Clone, Copy)]
pub struct AlphaKey(pub f64);

impl PartialEq for AlphaKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AlphaKey {}

impl PartialOrd for AlphaKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AlphaKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for AlphaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SummaryTable – the complete loaded result set
// ---------------------------------------------------------------------------

/// All per-file records of one run, in discovery order. Duplicated
/// parameter combinations are kept as separate rows.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    pub records: Vec<ResultFileRecord>,
}

impl SummaryTable {
    pub fn from_records(records: Vec<ResultFileRecord>) -> Self {
        SummaryTable { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultFileRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RunParams {
        RunParams {
            instance: "x".to_string(),
            zones: 4,
            alpha: 0.3,
        }
    }

    fn sample(cost_with: f64, time: f64) -> RawSample {
        RawSample { cost_with, time }
    }

    #[test]
    fn test_summary_of_three_runs() {
        let samples = [sample(8.0, 1.1), sample(9.0, 1.3), sample(8.5, 1.2)];
        let rec = ResultFileRecord::from_samples(params(), &samples).unwrap();

        assert_eq!(rec.instance, "x");
        assert_eq!(rec.zones, 4);
        assert_eq!(rec.alpha, 0.3);
        assert!((rec.avg_cost - 8.5).abs() < 1e-12);
        assert!((rec.cost_std - 0.5).abs() < 1e-12);
        assert!((rec.avg_time - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_single_run_has_undefined_std() {
        let rec = ResultFileRecord::from_samples(params(), &[sample(7.0, 2.0)]).unwrap();
        assert_eq!(rec.avg_cost, 7.0);
        assert!(rec.cost_std.is_nan());
        assert_eq!(rec.avg_time, 2.0);
    }

    #[test]
    fn test_empty_body_yields_no_record() {
        assert!(ResultFileRecord::from_samples(params(), &[]).is_none());
    }

    #[test]
    fn test_alpha_key_orders_numerically() {
        let mut keys = vec![AlphaKey(0.5), AlphaKey(0.1), AlphaKey(0.3)];
        keys.sort();
        let ordered: Vec<f64> = keys.iter().map(|k| k.0).collect();
        assert_eq!(ordered, vec![0.1, 0.3, 0.5]);
        assert_eq!(AlphaKey(0.3).to_string(), "0.3");
    }
}
