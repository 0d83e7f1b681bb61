use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::color::{ColorMap, Colormap};
use crate::data::filter::{instances, rows_for_instance, series_by_alpha};
use crate::data::model::{AlphaKey, ResultFileRecord, SummaryTable};

use super::theme::{self, Theme, FONT_FAMILY};

/// Errors that can occur while producing a chart image.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to prepare drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save chart {path}: {reason}")]
    Save { path: PathBuf, reason: String },
}

type Result<T> = core::result::Result<T, PlotError>;

// ---------------------------------------------------------------------------
// Per-instance charts
// ---------------------------------------------------------------------------

/// Render one cost/runtime image per instance into `out_dir`.
///
/// Returns the written paths, in instance order. An empty table writes
/// nothing.
pub fn plot_by_instance(
    table: &SummaryTable,
    out_dir: &Path,
    canvas_size: (u32, u32),
) -> Result<Vec<PathBuf>> {
    let names = instances(table);
    if names.is_empty() {
        info!("No instances to plot.");
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(out_dir).map_err(|source| PlotError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let theme = theme::init();
    let mut written = Vec::with_capacity(names.len());
    for inst in names {
        info!("Generating chart for instance: {inst}");
        let rows = rows_for_instance(table, inst);
        let path = out_dir.join(chart_file_name(inst));

        render_instance(inst, &rows, &path, canvas_size, theme)?;
        info!("  -> Saved: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// `grafico_<instance>.png`, with path separators replaced by `_`.
pub fn chart_file_name(instance: &str) -> String {
    let safe: String = instance
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("grafico_{safe}.png")
}

/// Draw both panels for one instance and write the PNG.
///
/// The bitmap canvas lives only inside this call and is released when it
/// returns, whether or not the image was saved.
fn render_instance(
    instance: &str,
    rows: &[&ResultFileRecord],
    path: &Path,
    canvas_size: (u32, u32),
    theme: &Theme,
) -> Result<()> {
    let root = BitMapBackend::new(path, canvas_size).into_drawing_area();
    root.fill(&theme.background)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let panels = root.split_evenly((1, 2));

    draw_metric_panel(
        &panels[0],
        &MetricPanel {
            title: format!("Cost vs Zones (by Alpha) | Map: {instance}"),
            y_desc: "Average cost (total variance)",
            colormap: Colormap::Viridis,
            marker: Marker::Circle,
            value: |r| r.avg_cost,
        },
        rows,
        theme,
    )?;
    draw_metric_panel(
        &panels[1],
        &MetricPanel {
            title: format!("Runtime vs Zones | Map: {instance}"),
            y_desc: "Average time (seconds)",
            colormap: Colormap::Magma,
            marker: Marker::Square,
            value: |r| r.avg_time,
        },
        rows,
        theme,
    )?;

    root.present().map_err(|e| PlotError::Save {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// One panel: metric vs zones, one line per alpha
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Marker {
    Circle,
    Square,
}

struct MetricPanel {
    title: String,
    y_desc: &'static str,
    colormap: Colormap,
    marker: Marker,
    value: fn(&ResultFileRecord) -> f64,
}

fn draw_metric_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &MetricPanel,
    rows: &[&ResultFileRecord],
    theme: &Theme,
) -> Result<()> {
    let x_range = padded_range(rows.iter().map(|r| r.zones as f64));
    let y_range = padded_range(rows.iter().map(|r| (panel.value)(r)));

    let mut builder = ChartBuilder::on(area);
    builder.margin(15);
    if theme.text {
        builder
            .caption(&panel.title, (FONT_FAMILY, theme.caption_size))
            .x_label_area_size(50)
            .y_label_area_size(70);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    if theme.text {
        chart
            .configure_mesh()
            .x_desc("Number of zones (p)")
            .y_desc(panel.y_desc)
            .axis_desc_style((FONT_FAMILY, theme.desc_size))
            .label_style((FONT_FAMILY, theme.label_size))
            .x_label_formatter(&|x| format!("{x:.0}"))
            .bold_line_style(&theme.grid)
            .light_line_style(&theme.background)
            .axis_style(&theme.axis)
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    } else {
        // No font: the mesh would need labels, so draw grid and frame directly.
        let (x0, x1) = (x_range.start, x_range.end);
        let (y0, y1) = (y_range.start, y_range.end);
        let grid = grid_ticks(&x_range, GRID_DIVISIONS)
            .into_iter()
            .map(|x| vec![(x, y0), (x, y1)])
            .chain(
                grid_ticks(&y_range, GRID_DIVISIONS)
                    .into_iter()
                    .map(|y| vec![(x0, y), (x1, y)]),
            );
        chart
            .draw_series(grid.map(|pts| PathElement::new(pts, theme.grid.stroke_width(1))))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)],
                theme.axis.stroke_width(1),
            )))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    let series = series_by_alpha(rows);
    let alphas: BTreeSet<AlphaKey> = series.keys().copied().collect();
    let colors = ColorMap::new(panel.colormap, &alphas);

    for (alpha, points) in &series {
        let color = colors.color_for(*alpha);
        let coords: Vec<(f64, f64)> = points
            .iter()
            .map(|r| (r.zones as f64, (panel.value)(r)))
            .filter(|(_, y)| y.is_finite())
            .collect();

        chart
            .draw_series(LineSeries::new(
                coords.iter().copied(),
                color.stroke_width(theme.line_width),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(format!("alpha = {alpha}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        let size = theme.marker_size;
        let drawn = match panel.marker {
            Marker::Circle => chart.draw_series(
                coords
                    .iter()
                    .map(|&c| EmptyElement::at(c) + Circle::new((0, 0), size, color.filled())),
            ),
            Marker::Square => chart.draw_series(coords.iter().map(|&c| {
                EmptyElement::at(c) + Rectangle::new([(-size, -size), (size, size)], color.filled())
            })),
        };
        drawn.map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    if theme.text {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT_FAMILY, theme.label_size))
            .background_style(&theme.background.mix(0.8))
            .border_style(&theme.axis)
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

const GRID_DIVISIONS: usize = 5;

/// Interior grid positions splitting `range` into `divisions` equal parts.
fn grid_ticks(range: &Range<f64>, divisions: usize) -> Vec<f64> {
    let step = (range.end - range.start) / divisions as f64;
    (1..divisions).map(|i| range.start + step * i as f64).collect()
}

/// Axis range over the finite values, padded by 5% each side.
/// A single distinct value gets a unit margin instead.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= 0.0 {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rec(instance: &str, zones: u32, alpha: f64, cost: f64, time: f64) -> ResultFileRecord {
        ResultFileRecord {
            instance: instance.to_string(),
            zones,
            alpha,
            avg_cost: cost,
            cost_std: 0.5,
            avg_time: time,
        }
    }

    #[test]
    fn test_chart_file_name_is_single_segment() {
        assert_eq!(chart_file_name("mapa1"), "grafico_mapa1.png");
        assert_eq!(chart_file_name("set/a\\b"), "grafico_set_a_b.png");
    }

    #[test]
    fn test_padded_range() {
        let r = padded_range([2.0, 12.0].into_iter());
        assert!((r.start - 1.5).abs() < 1e-12);
        assert!((r.end - 12.5).abs() < 1e-12);

        assert_eq!(padded_range([4.0].into_iter()), 3.0..5.0);
        assert_eq!(padded_range([f64::NAN].into_iter()), 0.0..1.0);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_grid_ticks_are_interior() {
        let ticks = grid_ticks(&(0.0..10.0), 5);
        assert_eq!(ticks, vec![2.0, 4.0, 6.0, 8.0]);
        assert!(grid_ticks(&(0.0..1.0), 1).is_empty());
    }

    #[test]
    fn test_chart_without_font_still_draws_grid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bare.png");
        let theme = Theme {
            text: false,
            ..theme::init().clone()
        };
        let a = rec("bare", 2, 0.1, 10.0, 0.5);
        let b = rec("bare", 4, 0.1, 8.0, 0.9);

        render_instance("bare", &[&a, &b], &path, (600, 300), &theme).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_one_image_per_instance() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("graficos").join("medianos");
        let table = SummaryTable::from_records(vec![
            rec("mapa_a", 2, 0.1, 10.0, 0.5),
            rec("mapa_a", 4, 0.1, 8.0, 0.9),
            rec("mapa_a", 2, 0.5, 12.0, 0.4),
            rec("mapa_a", 4, 0.5, 9.0, 1.1),
            rec("set/mapa_b", 3, 0.3, 7.0, 0.2),
        ]);

        let written = plot_by_instance(&table, &out, (600, 300)).unwrap();

        assert_eq!(
            written,
            vec![out.join("grafico_mapa_a.png"), out.join("grafico_set_mapa_b.png")]
        );
        for path in &written {
            assert!(path.is_file(), "{} should exist", path.display());
        }
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn test_single_row_with_undefined_std_renders() {
        let dir = tempdir().unwrap();
        let mut row = rec("solo", 4, 0.3, 5.0, 1.0);
        row.cost_std = f64::NAN;
        let table = SummaryTable::from_records(vec![row]);

        let written = plot_by_instance(&table, dir.path(), (600, 300)).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].is_file());
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("charts");
        let written = plot_by_instance(&SummaryTable::default(), &out, (600, 300)).unwrap();
        assert!(written.is_empty());
        assert!(!out.exists());
    }
}
