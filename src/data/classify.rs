use serde::Serialize;

use super::model::{ColumnKind, Dataset};

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// The analysis role a single column plays, derived from its group in the
/// [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Categorical,
    Continuous,
    Discrete,
    Temporal,
}

/// Four disjoint groups of column names, each in dataset column order.
/// Columns whose declared kind matches no group (bool columns) appear in
/// none of them and are simply left out of the analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub categorical: Vec<String>,
    pub continuous: Vec<String>,
    pub discrete: Vec<String>,
    pub temporal: Vec<String>,
}

impl Classification {
    /// The group a column landed in, if any.
    pub fn variable_kind(&self, name: &str) -> Option<VariableKind> {
        if self.categorical.iter().any(|c| c == name) {
            Some(VariableKind::Categorical)
        } else if self.continuous.iter().any(|c| c == name) {
            Some(VariableKind::Continuous)
        } else if self.discrete.iter().any(|c| c == name) {
            Some(VariableKind::Discrete)
        } else if self.temporal.iter().any(|c| c == name) {
            Some(VariableKind::Temporal)
        } else {
            None
        }
    }

    /// Numeric columns for the pair selectors: continuous first, then
    /// discrete, each group keeping dataset order.
    pub fn numeric(&self) -> Vec<String> {
        let mut cols = self.continuous.clone();
        cols.extend(self.discrete.iter().cloned());
        cols
    }
}

/// Partition the dataset's columns by declared kind. First matching rule
/// wins: text → categorical, float → continuous, integer → discrete,
/// timestamp → temporal; anything else is skipped without error.
///
/// A numeric value stored as text stays categorical: only the declared
/// kind is consulted, cell content is never re-parsed here.
pub fn classify(dataset: &Dataset) -> Classification {
    let mut groups = Classification::default();
    for col in dataset.columns() {
        match col.kind() {
            ColumnKind::Text => groups.categorical.push(col.name.clone()),
            ColumnKind::Float => groups.continuous.push(col.name.clone()),
            ColumnKind::Integer => groups.discrete.push(col.name.clone()),
            ColumnKind::Timestamp => groups.temporal.push(col.name.clone()),
            ColumnKind::Bool => {}
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnValues};

    fn dataset() -> Dataset {
        Dataset::from_columns(vec![
            Column::new("a", ColumnValues::Text(vec![Some("x".into())])),
            Column::new("b", ColumnValues::Float(vec![Some(1.5)])),
            Column::new("c", ColumnValues::Integer(vec![Some(3)])),
            Column::new("d", ColumnValues::Bool(vec![Some(true)])),
        ])
    }

    #[test]
    fn partitions_by_declared_kind() {
        let groups = classify(&dataset());
        assert_eq!(groups.categorical, vec!["a".to_string()]);
        assert_eq!(groups.continuous, vec!["b".to_string()]);
        assert_eq!(groups.discrete, vec!["c".to_string()]);
        assert!(groups.temporal.is_empty());
    }

    #[test]
    fn groups_are_disjoint() {
        let groups = classify(&dataset());
        let all: Vec<&String> = groups
            .categorical
            .iter()
            .chain(&groups.continuous)
            .chain(&groups.discrete)
            .chain(&groups.temporal)
            .collect();
        for name in &all {
            let occurrences = all.iter().filter(|n| n == &name).count();
            assert_eq!(occurrences, 1, "column {name} is in more than one group");
        }
    }

    #[test]
    fn bool_columns_are_in_no_group() {
        let groups = classify(&dataset());
        assert_eq!(groups.variable_kind("d"), None);
    }

    #[test]
    fn empty_dataset_yields_empty_groups() {
        let groups = classify(&Dataset::from_columns(Vec::new()));
        assert_eq!(groups, Classification::default());
    }

    #[test]
    fn order_follows_dataset_order() {
        let ds = Dataset::from_columns(vec![
            Column::new("z", ColumnValues::Float(vec![Some(1.0)])),
            Column::new("m", ColumnValues::Float(vec![Some(2.0)])),
            Column::new("a", ColumnValues::Integer(vec![Some(3)])),
        ]);
        let groups = classify(&ds);
        assert_eq!(groups.continuous, vec!["z".to_string(), "m".to_string()]);
        assert_eq!(groups.numeric(), vec!["z", "m", "a"]);
    }

    #[test]
    fn variable_kind_lookup() {
        let groups = classify(&dataset());
        assert_eq!(groups.variable_kind("a"), Some(VariableKind::Categorical));
        assert_eq!(groups.variable_kind("b"), Some(VariableKind::Continuous));
        assert_eq!(groups.variable_kind("c"), Some(VariableKind::Discrete));
        assert_eq!(groups.variable_kind("nope"), None);
    }
}
