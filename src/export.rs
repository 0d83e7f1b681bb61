use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::SummaryTable;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write the summary table as CSV: header row, one line per record, no
/// index column. Undefined values (`NaN`) become empty fields.
pub fn write_summary_csv(table: &SummaryTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for record in table.iter() {
        writer
            .serialize(record)
            .with_context(|| format!("writing row for instance {}", record.instance))?;
    }
    writer.flush().context("flushing summary CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ResultFileRecord;
    use tempfile::tempdir;

    fn read_back(path: &Path) -> Vec<ResultFileRecord> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader.deserialize().map(|r| r.unwrap()).collect()
    }

    fn rec(instance: &str, zones: u32, alpha: f64, std: f64) -> ResultFileRecord {
        ResultFileRecord {
            instance: instance.to_string(),
            zones,
            alpha,
            avg_cost: 8.5,
            cost_std: std,
            avg_time: 1.2000000000000002,
        }
    }

    #[test]
    fn test_header_and_column_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let table = SummaryTable::from_records(vec![rec("x", 4, 0.3, 0.5)]);

        write_summary_csv(&table, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Instancia,Zonas,Alpha,Costo_Promedio,Costo_Std,Tiempo_Promedio")
        );
        assert_eq!(lines.next(), Some("x,4,0.3,8.5,0.5,1.2000000000000002"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_undefined_std_is_empty_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let table = SummaryTable::from_records(vec![rec("solo", 2, 1.0, f64::NAN)]);

        write_summary_csv(&table, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().nth(1), Some("solo,2,1.0,8.5,,1.2000000000000002"));
    }

    #[test]
    fn test_round_trip_preserves_rows_and_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let records = vec![
            rec("mapa_b", 6, 0.5, 0.25),
            rec("mapa_a", 2, 0.1, f64::NAN),
            rec("mapa_b", 6, 0.5, 1.75),
            rec("set, with comma", 4, 0.3, 0.0),
        ];
        let table = SummaryTable::from_records(records.clone());

        write_summary_csv(&table, &path).unwrap();
        let back = read_back(&path);

        assert_eq!(back.len(), records.len());
        for (orig, got) in records.iter().zip(&back) {
            assert_eq!(got.instance, orig.instance);
            assert_eq!(got.zones, orig.zones);
            assert_eq!(got.alpha, orig.alpha);
            assert_eq!(got.avg_cost, orig.avg_cost);
            assert_eq!(got.avg_time, orig.avg_time);
            if orig.cost_std.is_nan() {
                assert!(got.cost_std.is_nan());
            } else {
                assert_eq!(got.cost_std, orig.cost_std);
            }
        }
    }
}
