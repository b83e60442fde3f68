/// UI layer: egui panels and egui_plot renderings.
///
/// `panels` owns the widgets and per-frame data preparation; `plot` only
/// draws already-computed analysis results.
pub mod panels;
pub mod plot;
