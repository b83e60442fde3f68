use std::fmt;

use crate::data::classify::VariableKind;

// ---------------------------------------------------------------------------
// Variable-pair routing
// ---------------------------------------------------------------------------

/// The kind tags the user picks in the combined-graphs selectors.
/// Continuous and discrete columns share one tag, matching the selector
/// wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairKind {
    #[default]
    Numeric,
    Temporal,
    Categorical,
}

impl PairKind {
    pub const ALL: [PairKind; 3] = [PairKind::Numeric, PairKind::Temporal, PairKind::Categorical];
}

impl fmt::Display for PairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairKind::Numeric => write!(f, "Continuous/Discrete"),
            PairKind::Temporal => write!(f, "Temporal"),
            PairKind::Categorical => write!(f, "Categorical"),
        }
    }
}

/// The bivariate visualization the router dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Scatter plot plus Pearson correlation readout.
    ScatterCorrelation,
    /// Line plot, x = temporal, y = numeric.
    LineOverTime,
    /// Per-category box plot, x = categorical, y = numeric.
    BoxByCategory,
    /// Mosaic plot plus Cramér's V readout.
    MosaicContingency,
}

/// Map the two selected kind tags to a plot. Only the listed orderings
/// dispatch — symmetric cases are not auto-mirrored, matching the
/// user-facing selector order. Everything else is a silent no-op for the
/// caller, not an error.
pub fn route(first: PairKind, second: PairKind) -> Option<PlotKind> {
    match (first, second) {
        (PairKind::Numeric, PairKind::Numeric) => Some(PlotKind::ScatterCorrelation),
        (PairKind::Numeric, PairKind::Temporal) => Some(PlotKind::LineOverTime),
        (PairKind::Categorical, PairKind::Numeric) => Some(PlotKind::BoxByCategory),
        (PairKind::Categorical, PairKind::Categorical) => Some(PlotKind::MosaicContingency),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Single-variable descriptive routing
// ---------------------------------------------------------------------------

/// What the analysis tab shows for one selected variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptiveView {
    /// Frequency bar chart over distinct values; no summary table.
    CountPlot,
    /// Summary table plus kernel-density plot.
    SummaryWithDensity,
    /// Summary table plus frequency histogram.
    SummaryWithHistogram,
}

/// Map a classified column kind to its descriptive view. Temporal columns
/// have none.
pub fn descriptive_view(kind: VariableKind) -> Option<DescriptiveView> {
    match kind {
        VariableKind::Categorical => Some(DescriptiveView::CountPlot),
        VariableKind::Continuous => Some(DescriptiveView::SummaryWithDensity),
        VariableKind::Discrete => Some(DescriptiveView::SummaryWithHistogram),
        VariableKind::Temporal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_orderings_dispatch() {
        assert_eq!(
            route(PairKind::Numeric, PairKind::Numeric),
            Some(PlotKind::ScatterCorrelation)
        );
        assert_eq!(
            route(PairKind::Numeric, PairKind::Temporal),
            Some(PlotKind::LineOverTime)
        );
        assert_eq!(
            route(PairKind::Categorical, PairKind::Numeric),
            Some(PlotKind::BoxByCategory)
        );
        assert_eq!(
            route(PairKind::Categorical, PairKind::Categorical),
            Some(PlotKind::MosaicContingency)
        );
    }

    #[test]
    fn unlisted_orderings_are_no_ops() {
        assert_eq!(route(PairKind::Temporal, PairKind::Temporal), None);
        assert_eq!(route(PairKind::Temporal, PairKind::Numeric), None);
        assert_eq!(route(PairKind::Temporal, PairKind::Categorical), None);
        assert_eq!(route(PairKind::Numeric, PairKind::Categorical), None);
        assert_eq!(route(PairKind::Categorical, PairKind::Temporal), None);
    }

    #[test]
    fn descriptive_views_per_kind() {
        use crate::data::classify::VariableKind;
        assert_eq!(
            descriptive_view(VariableKind::Categorical),
            Some(DescriptiveView::CountPlot)
        );
        assert_eq!(
            descriptive_view(VariableKind::Continuous),
            Some(DescriptiveView::SummaryWithDensity)
        );
        assert_eq!(
            descriptive_view(VariableKind::Discrete),
            Some(DescriptiveView::SummaryWithHistogram)
        );
        assert_eq!(descriptive_view(VariableKind::Temporal), None);
    }

    #[test]
    fn selector_labels() {
        assert_eq!(PairKind::Numeric.to_string(), "Continuous/Discrete");
        assert_eq!(PairKind::Temporal.to_string(), "Temporal");
        assert_eq!(PairKind::Categorical.to_string(), "Categorical");
    }
}
