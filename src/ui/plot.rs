use chrono::NaiveDateTime;
use eframe::egui::{Color32, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, Points,
    Polygon, VLine,
};

use crate::analysis::contingency::ContingencyTable;
use crate::analysis::density::GaussianKde;
use crate::analysis::describe::{DescriptiveSummary, HistogramBin};
use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Count plot (categorical single-variable view)
// ---------------------------------------------------------------------------

/// Frequency bar chart over a categorical column's distinct values.
pub fn count_plot(ui: &mut Ui, column: &str, counts: &[(String, usize)], colors: &ColorMap) {
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .width(0.6)
                .name(label)
                .fill(colors.color_for(label))
        })
        .collect();

    Plot::new("count_plot")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label(column.to_string())
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(column));
        });
}

// ---------------------------------------------------------------------------
// Density plot with selected range (continuous single-variable view)
// ---------------------------------------------------------------------------

/// KDE curve with the selected `[lo, hi]` range shaded and marked.
pub fn density_plot(ui: &mut Ui, column: &str, kde: &GaussianKde, lo: f64, hi: f64) {
    let (min, max) = kde.support();
    let pad = 3.0 * kde.bandwidth();
    let curve = kde.curve(min - pad, max + pad, 200);

    // Shaded area under the curve between the slider bounds.
    let mut region = kde.curve(lo, hi, 100);
    region.push([hi, 0.0]);
    region.push([lo, 0.0]);

    Plot::new("density_plot")
        .height(300.0)
        .x_axis_label(column.to_string())
        .y_axis_label("density")
        .show(ui, |plot_ui| {
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(region))
                    .fill_color(Color32::from_rgba_unmultiplied(255, 165, 0, 96))
                    .name("selected range"),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(curve))
                    .color(Color32::from_rgb(46, 139, 87))
                    .width(1.5)
                    .name(column),
            );
            plot_ui.vline(VLine::new(lo).color(Color32::DARK_GRAY));
            plot_ui.vline(VLine::new(hi).color(Color32::DARK_GRAY));
        });
}

// ---------------------------------------------------------------------------
// Histogram (discrete single-variable view)
// ---------------------------------------------------------------------------

/// Frequency histogram over equal-width bins.
pub fn histogram_plot(ui: &mut Ui, column: &str, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            let width = (bin.end - bin.start).max(f64::EPSILON);
            Bar::new(bin.center(), bin.count as f64)
                .width(width)
                .fill(Color32::from_rgb(70, 130, 180))
        })
        .collect();

    Plot::new("histogram_plot")
        .height(300.0)
        .x_axis_label(column.to_string())
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(column));
        });
}

// ---------------------------------------------------------------------------
// Scatter plot (numeric × numeric)
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, x_name: &str, y_name: &str, x: &[f64], y: &[f64]) {
    let points: PlotPoints = x.iter().zip(y.iter()).map(|(&xi, &yi)| [xi, yi]).collect();

    Plot::new("scatter_plot")
        .height(300.0)
        .x_axis_label(x_name.to_string())
        .y_axis_label(y_name.to_string())
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(3.0)
                    .color(Color32::from_rgb(70, 130, 180)),
            );
        });
}

// ---------------------------------------------------------------------------
// Line over time (numeric × temporal)
// ---------------------------------------------------------------------------

/// Line plot of a numeric column against a temporal one. Points are
/// sorted by timestamp; the x axis renders as dates.
pub fn line_over_time(
    ui: &mut Ui,
    time_name: &str,
    value_name: &str,
    series: &[(NaiveDateTime, f64)],
) {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|(ts, _)| *ts);

    let points: PlotPoints = sorted
        .iter()
        .map(|(ts, v)| [ts.and_utc().timestamp() as f64, *v])
        .collect();

    Plot::new("line_over_time")
        .height(300.0)
        .x_axis_label(time_name.to_string())
        .y_axis_label(value_name.to_string())
        .x_axis_formatter(|mark: GridMark, _range| format_timestamp(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .color(Color32::from_rgb(46, 139, 87))
                    .width(1.5)
                    .name(value_name),
            );
        });
}

fn format_timestamp(seconds: f64) -> String {
    chrono::DateTime::from_timestamp(seconds as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Box plot (categorical × numeric)
// ---------------------------------------------------------------------------

/// Quartile box with 1.5·IQR whiskers; values beyond the fences are drawn
/// as outlier points.
#[derive(Debug, Clone)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_lo: f64,
    pub whisker_hi: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let summary = DescriptiveSummary::from_values(values)?;
        let iqr = summary.q3 - summary.q1;
        let lower_fence = summary.q1 - 1.5 * iqr;
        let upper_fence = summary.q3 + 1.5 * iqr;

        let whisker_lo = values
            .iter()
            .copied()
            .filter(|&v| v >= lower_fence)
            .fold(f64::INFINITY, f64::min);
        let whisker_hi = values
            .iter()
            .copied()
            .filter(|&v| v <= upper_fence)
            .fold(f64::NEG_INFINITY, f64::max);
        let outliers = values
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(BoxStats {
            q1: summary.q1,
            median: summary.median,
            q3: summary.q3,
            whisker_lo,
            whisker_hi,
            outliers,
        })
    }
}

/// One box per category, categorical on x, numeric on y.
pub fn box_plot(
    ui: &mut Ui,
    cat_name: &str,
    value_name: &str,
    groups: &[(String, BoxStats)],
    colors: &ColorMap,
) {
    Plot::new("box_plot")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label(cat_name.to_string())
        .y_axis_label(value_name.to_string())
        .show(ui, |plot_ui| {
            for (i, (label, stats)) in groups.iter().enumerate() {
                let color = colors.color_for(label);
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(
                        stats.whisker_lo,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.whisker_hi,
                    ),
                )
                .box_width(0.5)
                .fill(color.gamma_multiply(0.4))
                .stroke((1.5, color));

                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(label));

                if !stats.outliers.is_empty() {
                    let points: PlotPoints =
                        stats.outliers.iter().map(|&v| [i as f64, v]).collect();
                    plot_ui.points(Points::new(points).radius(2.0).color(color));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Mosaic plot (categorical × categorical)
// ---------------------------------------------------------------------------

/// Area-proportional mosaic: column widths follow the first variable's
/// marginal shares, each column splits vertically by the second
/// variable's conditional shares.
pub fn mosaic_plot(ui: &mut Ui, x_name: &str, y_name: &str, table: &ContingencyTable, colors: &ColorMap) {
    const GAP: f64 = 0.01;

    let row_totals = table.row_totals();
    let n = table.total as f64;

    Plot::new("mosaic_plot")
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label(x_name.to_string())
        .y_axis_label(y_name.to_string())
        .show_grid(false)
        .show(ui, |plot_ui| {
            if table.total == 0 {
                return;
            }
            let mut x0 = 0.0;
            for r in 0..table.n_rows() {
                let row_total = row_totals[r] as f64;
                let width = row_total / n;
                let mut y0 = 0.0;
                for (c, col_label) in table.col_labels.iter().enumerate() {
                    let count = table.counts[r][c] as f64;
                    if count == 0.0 || row_total == 0.0 {
                        continue;
                    }
                    let height = count / row_total;
                    let x1 = x0 + width - GAP;
                    let y1 = y0 + height - GAP;
                    let tile = vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(tile))
                            .fill_color(colors.color_for(col_label).gamma_multiply(0.7))
                            .name(col_label),
                    );
                    y0 += height;
                }
                x0 += width;
            }
        });
}
