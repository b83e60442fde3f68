use std::fmt;

use crate::analysis::route::PairKind;
use crate::data::classify::{self, Classification};
use crate::data::model::Dataset;
use crate::data::upload::UploadKind;

// ---------------------------------------------------------------------------
// Session – what data the application currently holds
// ---------------------------------------------------------------------------

/// A dataset together with its one-time column classification.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub classification: Classification,
}

/// Explicit session state machine. The analysis views render as a
/// function of this state instead of probing widget objects for data.
#[derive(Debug, Clone, Default)]
pub enum Session {
    /// Nothing picked yet; analysis tabs show the upload prompt.
    #[default]
    NoFile,
    /// A dataset is in memory, classified once at load time.
    Loaded(LoadedData),
    /// The picked file has an unsupported format.
    Unsupported { message: String },
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Upload,
    Analysis,
    Combined,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Upload, Tab::Analysis, Tab::Combined];
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Upload => write!(f, "Data Upload"),
            Tab::Analysis => write!(f, "Data Analysis"),
            Tab::Combined => write!(f, "Combined Graphs"),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tab widget selections
// ---------------------------------------------------------------------------

/// Selections on the single-variable analysis tab.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSelection {
    pub variable: Option<String>,
    /// Density slider bounds; initialised from the column range when the
    /// variable changes.
    pub density_range: Option<(f64, f64)>,
}

/// Selections on the combined-graphs tab. Created per interaction and
/// discarded when the dataset changes; no history is retained.
#[derive(Debug, Clone, Default)]
pub struct CombinedSelection {
    pub first_kind: PairKind,
    pub second_kind: PairKind,
    pub first_var: Option<String>,
    pub second_var: Option<String>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,

    /// Which tab is showing.
    pub active_tab: Tab,

    /// What kind of file the user last picked.
    pub upload_kind: UploadKind,

    /// Display name of the picked file.
    pub picked_file: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    pub analysis: AnalysisSelection,
    pub combined: CombinedSelection,
}

impl AppState {
    /// Ingest a newly loaded dataset: classify it once and reset every
    /// per-dataset selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let classification = classify::classify(&dataset);
        log::info!(
            "classified {} columns: {} categorical, {} continuous, {} discrete, {} temporal",
            dataset.n_cols(),
            classification.categorical.len(),
            classification.continuous.len(),
            classification.discrete.len(),
            classification.temporal.len(),
        );
        self.session = Session::Loaded(LoadedData {
            dataset,
            classification,
        });
        self.analysis = AnalysisSelection::default();
        self.combined = CombinedSelection::default();
        self.status_message = None;
    }

    /// The picked file has no loader; drop any previous dataset.
    pub fn set_unsupported(&mut self, message: impl Into<String>) {
        self.session = Session::Unsupported {
            message: message.into(),
        };
        self.analysis = AnalysisSelection::default();
        self.combined = CombinedSelection::default();
    }

    /// The loaded dataset, if any.
    pub fn loaded(&self) -> Option<&LoadedData> {
        match &self.session {
            Session::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Pick the variable for the single-variable view, resetting the
    /// density slider so it re-initialises from the new column's range.
    pub fn select_variable(&mut self, name: String) {
        if self.analysis.variable.as_deref() != Some(name.as_str()) {
            self.analysis.variable = Some(name);
            self.analysis.density_range = None;
        }
    }

    /// Change one of the pair-kind selectors. The matching variable
    /// choice is cleared because its option list changes with the kind.
    pub fn select_pair_kind(&mut self, first: bool, kind: PairKind) {
        let slot = if first {
            &mut self.combined.first_kind
        } else {
            &mut self.combined.second_kind
        };
        if *slot != kind {
            *slot = kind;
            if first {
                self.combined.first_var = None;
            } else {
                self.combined.second_var = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnValues};

    fn dataset() -> Dataset {
        Dataset::from_columns(vec![
            Column::new("name", ColumnValues::Text(vec![Some("x".into()), Some("y".into())])),
            Column::new("value", ColumnValues::Float(vec![Some(1.0), Some(2.0)])),
        ])
    }

    #[test]
    fn loading_classifies_and_resets_selections() {
        let mut state = AppState::default();
        state.analysis.variable = Some("stale".into());
        state.combined.first_var = Some("stale".into());
        state.status_message = Some("old error".into());

        state.set_dataset(dataset());

        let loaded = state.loaded().unwrap();
        assert_eq!(loaded.classification.categorical, vec!["name".to_string()]);
        assert_eq!(loaded.classification.continuous, vec!["value".to_string()]);
        assert!(state.analysis.variable.is_none());
        assert!(state.combined.first_var.is_none());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn unsupported_pick_drops_the_dataset() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_unsupported("Other, please upload csv or Excel");
        assert!(state.loaded().is_none());
        assert!(matches!(state.session, Session::Unsupported { .. }));
    }

    #[test]
    fn variable_change_resets_the_density_range() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_variable("value".into());
        state.analysis.density_range = Some((0.0, 1.0));

        // Re-selecting the same variable keeps the slider.
        state.select_variable("value".into());
        assert_eq!(state.analysis.density_range, Some((0.0, 1.0)));

        state.select_variable("name".into());
        assert!(state.analysis.density_range.is_none());
    }

    #[test]
    fn kind_change_clears_only_that_sides_variable() {
        let mut state = AppState::default();
        state.combined.first_var = Some("a".into());
        state.combined.second_var = Some("b".into());

        state.select_pair_kind(true, PairKind::Categorical);
        assert!(state.combined.first_var.is_none());
        assert_eq!(state.combined.second_var.as_deref(), Some("b"));

        // Same kind again is a no-op.
        state.combined.first_var = Some("c".into());
        state.select_pair_kind(true, PairKind::Categorical);
        assert_eq!(state.combined.first_var.as_deref(), Some("c"));
    }
}
