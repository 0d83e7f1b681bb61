use std::collections::{BTreeMap, BTreeSet};

use super::model::{AlphaKey, ResultFileRecord, SummaryTable};

// ---------------------------------------------------------------------------
// Per-instance selection
// ---------------------------------------------------------------------------

/// Distinct instance names, in order of first appearance.
pub fn instances(table: &SummaryTable) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    table
        .iter()
        .map(|r| r.instance.as_str())
        .filter(|inst| seen.insert(*inst))
        .collect()
}

/// Rows belonging to `instance`, sorted by zones then alpha.
pub fn rows_for_instance<'a>(table: &'a SummaryTable, instance: &str) -> Vec<&'a ResultFileRecord> {
    let mut rows: Vec<&ResultFileRecord> =
        table.iter().filter(|r| r.instance == instance).collect();
    rows.sort_by(|a, b| {
        a.zones
            .cmp(&b.zones)
            .then_with(|| a.alpha.total_cmp(&b.alpha))
    });
    rows
}

/// Split already-sorted rows into one series per alpha value.
///
/// Each series keeps the incoming row order, so zones stay ascending.
pub fn series_by_alpha<'a>(
    rows: &[&'a ResultFileRecord],
) -> BTreeMap<AlphaKey, Vec<&'a ResultFileRecord>> {
    let mut series: BTreeMap<AlphaKey, Vec<&ResultFileRecord>> = BTreeMap::new();
    for row in rows {
        series.entry(row.alpha_key()).or_default().push(*row);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(instance: &str, zones: u32, alpha: f64) -> ResultFileRecord {
        ResultFileRecord {
            instance: instance.to_string(),
            zones,
            alpha,
            avg_cost: zones as f64 * alpha,
            cost_std: f64::NAN,
            avg_time: 1.0,
        }
    }

    fn table() -> SummaryTable {
        SummaryTable::from_records(vec![
            rec("b", 6, 0.5),
            rec("a", 4, 0.3),
            rec("b", 2, 0.5),
            rec("b", 2, 0.1),
            rec("a", 2, 0.3),
        ])
    }

    #[test]
    fn test_instances_keep_first_appearance_order() {
        assert_eq!(instances(&table()), vec!["b", "a"]);
        assert!(instances(&SummaryTable::default()).is_empty());
    }

    #[test]
    fn test_rows_sorted_by_zones_then_alpha() {
        let t = table();
        let rows = rows_for_instance(&t, "b");
        let keys: Vec<(u32, f64)> = rows.iter().map(|r| (r.zones, r.alpha)).collect();
        assert_eq!(keys, vec![(2, 0.1), (2, 0.5), (6, 0.5)]);
    }

    #[test]
    fn test_series_grouped_by_alpha() {
        let t = table();
        let rows = rows_for_instance(&t, "b");
        let series = series_by_alpha(&rows);

        assert_eq!(series.len(), 2);
        let zones_05: Vec<u32> = series[&AlphaKey(0.5)].iter().map(|r| r.zones).collect();
        assert_eq!(zones_05, vec![2, 6]);
        assert_eq!(series[&AlphaKey(0.1)].len(), 1);
    }
}
