use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Slider, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::analysis::contingency::ContingencyTable;
use crate::analysis::correlate;
use crate::analysis::density::GaussianKde;
use crate::analysis::describe::{self, DescriptiveSummary};
use crate::analysis::route::{self, DescriptiveView, PairKind, PlotKind};
use crate::color::ColorMap;
use crate::data::classify::Classification;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::upload::UploadKind;
use crate::state::{AppState, Session, Tab};
use crate::ui::plot::{self, BoxStats};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = state.loaded() {
            ui.label(format!(
                "{} rows × {} columns loaded",
                loaded.dataset.n_rows(),
                loaded.dataset.n_cols()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel: tab bar + active view
// ---------------------------------------------------------------------------

pub fn central(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            if ui
                .selectable_label(state.active_tab == tab, tab.to_string())
                .clicked()
            {
                state.active_tab = tab;
            }
        }
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.active_tab {
            Tab::Upload => upload_view(ui, state),
            Tab::Analysis => analysis_view(ui, state),
            Tab::Combined => combined_view(ui, state),
        });
}

/// Shared guard for the two analysis tabs: render the prompt and report
/// whether a dataset is available.
fn dataset_available(ui: &mut Ui, state: &AppState) -> bool {
    match &state.session {
        Session::Loaded(_) => true,
        Session::Unsupported { message } => {
            ui.label(format!("File type: {message}"));
            ui.label("Please load data in the Data Upload tab first.");
            false
        }
        Session::NoFile => {
            ui.label("Please load data in the Data Upload tab first.");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Upload tab
// ---------------------------------------------------------------------------

fn upload_view(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Load Data");
    ui.label("Upload a tabular file (.csv, .xls or .xlsx) to explore it.");
    ui.add_space(4.0);

    if ui.button("Open file…").clicked() {
        open_file_dialog(state);
    }

    let picked = state.picked_file.clone().unwrap_or_default();
    if picked.is_empty() {
        ui.label(format!("File type: {}", state.upload_kind));
    } else {
        ui.label(format!("File type: {}  ({picked})", state.upload_kind));
    }

    if let Some(loaded) = state.loaded() {
        ui.add_space(8.0);
        ui.strong("Data preview:");
        preview_table(ui, &loaded.dataset);
        ui.add_space(4.0);
        ui.label(format!(
            "{} rows × {} columns",
            loaded.dataset.n_rows(),
            loaded.dataset.n_cols()
        ));
    }
}

/// First five rows of the dataset, with the declared kind next to each
/// column name.
fn preview_table(ui: &mut Ui, dataset: &Dataset) {
    const PREVIEW_ROWS: usize = 5;
    let n_rows = dataset.n_rows().min(PREVIEW_ROWS);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(TableColumn::auto().resizable(true), dataset.n_cols())
        .header(20.0, |mut header| {
            for col in dataset.columns() {
                header.col(|ui: &mut Ui| {
                    ui.strong(format!("{} ({})", col.name, col.kind()));
                });
            }
        })
        .body(|mut body| {
            for row in 0..n_rows {
                body.row(18.0, |mut table_row| {
                    for col in dataset.columns() {
                        table_row.col(|ui: &mut Ui| {
                            ui.label(col.format_cell(row));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Analysis tab (single variable)
// ---------------------------------------------------------------------------

fn analysis_view(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Analysis");
    if !dataset_available(ui, state) {
        return;
    }

    let mut selected_var = state.analysis.variable.clone();
    let mut new_range: Option<(f64, f64)> = None;

    {
        let Some(loaded) = state.loaded() else { return };
        let dataset = &loaded.dataset;
        let groups = &loaded.classification;

        ui.label(format!(
            "Categorical variables: {}",
            groups.categorical.join(", ")
        ));
        ui.label(format!(
            "Continuous variables: {}",
            groups.continuous.join(", ")
        ));
        ui.label(format!("Discrete variables: {}", groups.discrete.join(", ")));
        ui.label(format!("Temporal variables: {}", groups.temporal.join(", ")));
        ui.add_space(8.0);

        ui.strong("Variable for descriptive analysis");
        egui::ComboBox::from_id_salt("descriptive_variable")
            .selected_text(selected_var.clone().unwrap_or_else(|| "— select —".into()))
            .show_ui(ui, |ui: &mut Ui| {
                for name in dataset.column_names() {
                    ui.selectable_value(&mut selected_var, Some(name.clone()), name);
                }
            });
        ui.add_space(8.0);

        if let Some(name) = &selected_var {
            if let Some(column) = dataset.column(name) {
                match groups.variable_kind(name).and_then(route::descriptive_view) {
                    Some(DescriptiveView::CountPlot) => {
                        let cells = column.text_values().unwrap_or(&[]);
                        let counts = describe::value_counts(cells);
                        let colors = ColorMap::new(counts.iter().map(|(l, _)| l.as_str()));
                        plot::count_plot(ui, name, &counts, &colors);
                    }
                    Some(DescriptiveView::SummaryWithDensity) => {
                        let values =
                            describe::present_values(&column.numeric_values().unwrap_or_default());
                        if let Some(summary) = DescriptiveSummary::from_values(&values) {
                            summary_grid(ui, &summary);
                            ui.add_space(8.0);
                            new_range = density_section(
                                ui,
                                name,
                                &values,
                                &summary,
                                state.analysis.density_range,
                            );
                        } else {
                            ui.label("This column has no values to summarize.");
                        }
                    }
                    Some(DescriptiveView::SummaryWithHistogram) => {
                        let values =
                            describe::present_values(&column.numeric_values().unwrap_or_default());
                        if let Some(summary) = DescriptiveSummary::from_values(&values) {
                            summary_grid(ui, &summary);
                            ui.add_space(8.0);
                            let bins = describe::histogram(
                                &values,
                                describe::sturges_bin_count(values.len()),
                            );
                            plot::histogram_plot(ui, name, &bins);
                        } else {
                            ui.label("This column has no values to summarize.");
                        }
                    }
                    None => {
                        ui.label("No descriptive view is available for this column.");
                    }
                }
            }
        }
    }

    if selected_var != state.analysis.variable {
        if let Some(name) = selected_var {
            state.select_variable(name);
        }
    } else if new_range.is_some() {
        state.analysis.density_range = new_range;
    }
}

/// Density plot with a selectable value range and its probability mass.
/// Returns the range to remember for the next frame.
fn density_section(
    ui: &mut Ui,
    name: &str,
    values: &[f64],
    summary: &DescriptiveSummary,
    stored_range: Option<(f64, f64)>,
) -> Option<(f64, f64)> {
    let Some(kde) = GaussianKde::new(values) else {
        ui.label("Density needs at least two distinct values.");
        return None;
    };

    let (min, max) = (summary.min, summary.max);
    let (mut lo, mut hi) = stored_range.unwrap_or((min, max));
    lo = lo.clamp(min, max);
    hi = hi.clamp(min, max);

    ui.add(Slider::new(&mut lo, min..=max).text(format!("lower {name}")));
    ui.add(Slider::new(&mut hi, min..=max).text(format!("upper {name}")));
    if hi < lo {
        hi = lo;
    }

    plot::density_plot(ui, name, &kde, lo, hi);
    ui.label(format!("Probability: {:.4}", kde.mass_between(lo, hi)));

    Some((lo, hi))
}

fn summary_grid(ui: &mut Ui, summary: &DescriptiveSummary) {
    Grid::new("describe_grid").striped(true).show(ui, |ui: &mut Ui| {
        for (label, value) in summary.rows() {
            ui.label(label);
            ui.label(value);
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Combined-graphs tab (two variables)
// ---------------------------------------------------------------------------

fn combined_view(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Combined Graphs of Two Variables");
    if !dataset_available(ui, state) {
        return;
    }

    let mut first_kind = state.combined.first_kind;
    let mut second_kind = state.combined.second_kind;
    let mut first_var = state.combined.first_var.clone();
    let mut second_var = state.combined.second_var.clone();

    {
        let Some(loaded) = state.loaded() else { return };
        let dataset = &loaded.dataset;
        let groups = &loaded.classification;

        kind_selector(ui, "first_kind", "Kind of the first variable", &mut first_kind);
        kind_selector(ui, "second_kind", "Kind of the second variable", &mut second_kind);
        ui.add_space(4.0);

        variable_selector(
            ui,
            "first_var",
            "First variable",
            &options_for(groups, first_kind),
            &mut first_var,
        );
        variable_selector(
            ui,
            "second_var",
            "Second variable",
            &options_for(groups, second_kind),
            &mut second_var,
        );
        ui.add_space(8.0);

        // Unhandled kind combinations produce nothing, matching the
        // selector-order dispatch table.
        if let Some(plot_kind) = route::route(first_kind, second_kind) {
            if let (Some(a), Some(b)) = (&first_var, &second_var) {
                render_pair(ui, dataset, plot_kind, a, b);
            }
        }
    }

    state.select_pair_kind(true, first_kind);
    state.select_pair_kind(false, second_kind);
    if first_var != state.combined.first_var {
        state.combined.first_var = first_var;
    }
    if second_var != state.combined.second_var {
        state.combined.second_var = second_var;
    }
}

fn kind_selector(ui: &mut Ui, id: &str, label: &str, kind: &mut PairKind) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(kind.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for option in PairKind::ALL {
                    ui.selectable_value(kind, option, option.to_string());
                }
            });
    });
}

fn variable_selector(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    selection: &mut Option<String>,
) {
    // A stale choice from a previous kind is not offered back.
    if let Some(current) = selection.clone() {
        if !options.contains(&current) {
            *selection = None;
        }
    }
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(selection.clone().unwrap_or_else(|| "— select —".into()))
            .show_ui(ui, |ui: &mut Ui| {
                for name in options {
                    ui.selectable_value(selection, Some(name.clone()), name);
                }
            });
    });
}

/// Which columns a kind tag offers: numeric tags list continuous columns
/// first, then discrete, each in dataset order.
fn options_for(groups: &Classification, kind: PairKind) -> Vec<String> {
    match kind {
        PairKind::Numeric => groups.numeric(),
        PairKind::Temporal => groups.temporal.clone(),
        PairKind::Categorical => groups.categorical.clone(),
    }
}

fn render_pair(ui: &mut Ui, dataset: &Dataset, plot_kind: PlotKind, first: &str, second: &str) {
    match plot_kind {
        PlotKind::ScatterCorrelation => {
            let (Some(xs), Some(ys)) = (numeric_cells(dataset, first), numeric_cells(dataset, second))
            else {
                return;
            };
            let (x, y) = correlate::paired(&xs, &ys);
            plot::scatter_plot(ui, first, second, &x, &y);
            match correlate::pearson(&x, &y) {
                Some(r) => {
                    ui.label(format!("Correlation between {first} and {second}: {r:.4}"));
                }
                None => {
                    ui.label(format!(
                        "Correlation between {first} and {second}: undefined"
                    ));
                }
            }
        }
        PlotKind::LineOverTime => {
            let Some(values) = numeric_cells(dataset, first) else { return };
            let Some(times) = dataset.column(second).and_then(|c| c.timestamps()) else {
                return;
            };
            let series: Vec<_> = times
                .iter()
                .zip(values.iter())
                .filter_map(|(t, v)| match (t, v) {
                    (Some(t), Some(v)) if v.is_finite() => Some((*t, *v)),
                    _ => None,
                })
                .collect();
            plot::line_over_time(ui, second, first, &series);
        }
        PlotKind::BoxByCategory => {
            let Some(cats) = dataset.column(first).and_then(|c| c.text_values()) else {
                return;
            };
            let Some(nums) = numeric_cells(dataset, second) else { return };
            let grouped = group_by_category(cats, &nums);
            let boxes: Vec<(String, BoxStats)> = grouped
                .into_iter()
                .filter_map(|(label, values)| {
                    BoxStats::from_values(&values).map(|stats| (label, stats))
                })
                .collect();
            let colors = ColorMap::new(boxes.iter().map(|(l, _)| l.as_str()));
            plot::box_plot(ui, first, second, &boxes, &colors);
        }
        PlotKind::MosaicContingency => {
            let (Some(xs), Some(ys)) = (
                dataset.column(first).and_then(|c| c.text_values()),
                dataset.column(second).and_then(|c| c.text_values()),
            ) else {
                return;
            };
            let table = ContingencyTable::from_cells(xs, ys);
            let colors = ColorMap::new(table.col_labels.iter().map(String::as_str));
            plot::mosaic_plot(ui, first, second, &table, &colors);
            match table.cramer_v() {
                Some(v) => {
                    ui.label(format!(
                        "Cramér's V between {first} and {second}: {v:.4}"
                    ));
                }
                None => {
                    ui.label(format!(
                        "Cramér's V between {first} and {second}: undefined (constant column)"
                    ));
                }
            }
        }
    }
}

fn numeric_cells(dataset: &Dataset, name: &str) -> Option<Vec<Option<f64>>> {
    dataset.column(name).and_then(|c| c.numeric_values())
}

/// Numeric values grouped by category label, labels in first-appearance
/// order. Rows missing either cell are dropped.
fn group_by_category(
    cats: &[Option<String>],
    nums: &[Option<f64>],
) -> Vec<(String, Vec<f64>)> {
    let mut grouped: Vec<(String, Vec<f64>)> = Vec::new();
    for (cat, num) in cats.iter().zip(nums.iter()) {
        let (Some(cat), Some(num)) = (cat, num) else { continue };
        if !num.is_finite() {
            continue;
        }
        match grouped.iter_mut().find(|(label, _)| label == cat) {
            Some((_, values)) => values.push(*num),
            None => grouped.push((cat.clone(), vec![*num])),
        }
    }
    grouped
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("Supported files", &["csv", "xls", "xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xls", "xlsx"])
        .pick_file();

    let Some(path) = file else { return };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string());
    let kind = UploadKind::detect(file_name.as_deref());
    state.upload_kind = kind;
    state.picked_file = file_name;

    if !kind.is_loadable() {
        state.set_unsupported(kind.to_string());
        return;
    }

    match loader::load_file(&path) {
        Ok(dataset) => {
            log::info!(
                "loaded {} rows × {} columns from {}",
                dataset.n_rows(),
                dataset.n_cols(),
                path.display()
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
