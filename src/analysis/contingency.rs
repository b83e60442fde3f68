// ---------------------------------------------------------------------------
// Contingency table + Cramér's V
// ---------------------------------------------------------------------------

/// Cross-tabulation of two categorical columns: joint occurrence counts
/// over the rows where both cells are present. Labels keep their
/// first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// counts[r][c] = joint occurrences of (row_labels[r], col_labels[c]).
    pub counts: Vec<Vec<u64>>,
    pub total: u64,
}

impl ContingencyTable {
    /// Build the table from two paired cell sequences. Rows where either
    /// side is missing are dropped.
    pub fn from_cells(x: &[Option<String>], y: &[Option<String>]) -> Self {
        let mut row_labels: Vec<String> = Vec::new();
        let mut col_labels: Vec<String> = Vec::new();
        let mut pairs: Vec<(usize, usize)> = Vec::new();

        for (a, b) in x.iter().zip(y.iter()) {
            let (Some(a), Some(b)) = (a, b) else { continue };
            let r = index_of(&mut row_labels, a);
            let c = index_of(&mut col_labels, b);
            pairs.push((r, c));
        }

        let mut counts = vec![vec![0u64; col_labels.len()]; row_labels.len()];
        for (r, c) in &pairs {
            counts[*r][*c] += 1;
        }

        ContingencyTable {
            row_labels,
            col_labels,
            counts,
            total: pairs.len() as u64,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Marginal counts per row label.
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Marginal counts per column label.
    pub fn col_totals(&self) -> Vec<u64> {
        (0..self.n_cols())
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .collect()
    }

    /// Chi-square statistic of independence: Σ (O − E)² / E, with the
    /// expected counts derived from the margins. Every label present in
    /// the table has a positive margin, so E is never zero here.
    pub fn chi_square(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let row_totals = self.row_totals();
        let col_totals = self.col_totals();
        let n = self.total as f64;

        let mut chi2 = 0.0;
        for (r, row) in self.counts.iter().enumerate() {
            for (c, &observed) in row.iter().enumerate() {
                let expected = row_totals[r] as f64 * col_totals[c] as f64 / n;
                let diff = observed as f64 - expected;
                chi2 += diff * diff / expected;
            }
        }
        chi2
    }

    /// Cramér's V: `sqrt(chi² / (n · (min(dims) − 1)))`, bounded in
    /// `[0, 1]`. `None` when the smaller table dimension is 1 (a constant
    /// column) or the table is empty — the degenerate case is reported as
    /// undefined instead of dividing by zero.
    pub fn cramer_v(&self) -> Option<f64> {
        let k = self.n_rows().min(self.n_cols());
        if self.total == 0 || k <= 1 {
            return None;
        }
        let v = (self.chi_square() / (self.total as f64 * (k - 1) as f64)).sqrt();
        Some(v.clamp(0.0, 1.0))
    }
}

fn index_of(labels: &mut Vec<String>, value: &str) -> usize {
    match labels.iter().position(|l| l == value) {
        Some(i) => i,
        None => {
            labels.push(value.to_string());
            labels.len() - 1
        }
    }
}

/// Convenience wrapper over paired cell sequences.
pub fn cramer_v(x: &[Option<String>], y: &[Option<String>]) -> Option<f64> {
    ContingencyTable::from_cells(x, y).cramer_v()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn crosstab_counts_joint_occurrences() {
        let x = cells(&["a", "a", "b", "b"]);
        let y = cells(&["u", "v", "u", "u"]);
        let table = ContingencyTable::from_cells(&x, &y);
        assert_eq!(table.row_labels, vec!["a", "b"]);
        assert_eq!(table.col_labels, vec!["u", "v"]);
        assert_eq!(table.counts, vec![vec![1, 1], vec![2, 0]]);
        assert_eq!(table.total, 4);
        assert_eq!(table.row_totals(), vec![2, 2]);
        assert_eq!(table.col_totals(), vec![3, 1]);
    }

    #[test]
    fn missing_cells_drop_the_whole_row() {
        let x = vec![Some("a".to_string()), None, Some("b".to_string())];
        let y = vec![Some("u".to_string()), Some("v".to_string()), None];
        let table = ContingencyTable::from_cells(&x, &y);
        assert_eq!(table.total, 1);
    }

    #[test]
    fn perfect_association_is_one() {
        let x = cells(&["a", "a", "b", "b"]);
        let y = cells(&["u", "u", "v", "v"]);
        let v = cramer_v(&x, &y).unwrap();
        assert!((v - 1.0).abs() < 1e-12, "v was {v}");
    }

    #[test]
    fn independence_is_near_zero() {
        // Balanced 2×2 with identical conditional distributions.
        let x = cells(&["a", "a", "b", "b"]);
        let y = cells(&["u", "v", "u", "v"]);
        let v = cramer_v(&x, &y).unwrap();
        assert!(v.abs() < 1e-12, "v was {v}");
    }

    #[test]
    fn cramer_v_is_symmetric() {
        let x = cells(&["a", "a", "b", "c", "c", "a"]);
        let y = cells(&["u", "v", "u", "v", "u", "u"]);
        let forward = cramer_v(&x, &y).unwrap();
        let backward = cramer_v(&y, &x).unwrap();
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn cramer_v_is_bounded() {
        let x = cells(&["a", "b", "a", "b", "c", "c", "a"]);
        let y = cells(&["u", "u", "v", "v", "u", "v", "u"]);
        let v = cramer_v(&x, &y).unwrap();
        assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn constant_column_is_undefined() {
        let x = cells(&["a", "a", "a"]);
        let y = cells(&["u", "v", "u"]);
        assert_eq!(cramer_v(&x, &y), None);
        assert_eq!(cramer_v(&y, &x), None);
    }

    #[test]
    fn empty_input_is_undefined() {
        assert_eq!(cramer_v(&[], &[]), None);
    }
}
