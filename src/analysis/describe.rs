use serde::Serialize;
use statrs::statistics::Statistics;

// ---------------------------------------------------------------------------
// Descriptive summary (count / mean / std / min / quartiles / max)
// ---------------------------------------------------------------------------

/// The eight-row descriptive summary shown for numeric columns. Follows
/// the Pandas `describe` contract: sample standard deviation (n − 1
/// denominator) and quartiles by linear interpolation over the sorted
/// sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl DescriptiveSummary {
    /// Summarize a sample. `None` when no finite values remain.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }

        let mean = finite.iter().mean();
        let std = finite.iter().std_dev();
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = finite.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);

        Some(DescriptiveSummary {
            count: finite.len(),
            mean,
            std,
            min,
            q1,
            median,
            q3,
            max,
        })
    }

    /// (label, formatted value) rows in `describe` order, for the UI grid.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("count", self.count.to_string()),
            ("mean", format!("{:.4}", self.mean)),
            ("std", format!("{:.4}", self.std)),
            ("min", format!("{:.4}", self.min)),
            ("25%", format!("{:.4}", self.q1)),
            ("50%", format!("{:.4}", self.median)),
            ("75%", format!("{:.4}", self.q3)),
            ("max", format!("{:.4}", self.max)),
        ]
    }
}

/// Interpolated percentile over an already-sorted, non-empty sample.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = (sorted.len() - 1) as f64 * p;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    if lower == upper || upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Drop missing and non-finite cells.
pub fn present_values(cells: &[Option<f64>]) -> Vec<f64> {
    cells
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}

// ---------------------------------------------------------------------------
// Frequencies
// ---------------------------------------------------------------------------

/// Distinct value → occurrence count, in first-appearance order. Missing
/// cells are skipped.
pub fn value_counts(cells: &[Option<String>]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in cells.iter().flatten() {
        match counts.iter_mut().find(|(v, _)| v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.clone(), 1)),
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Sturges' rule for the default bin count.
pub fn sturges_bin_count(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    ((1.0 + (n as f64).log2()).ceil() as usize).max(1)
}

/// Equal-width frequency bins over the sample range. The final bin is
/// closed on both ends so the maximum lands in it.
pub fn histogram(values: &[f64], n_bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || n_bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        // Degenerate range: a single bin holding everything.
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let bin_width = (max - min) / n_bins as f64;
    (0..n_bins)
        .map(|i| {
            let start = min + i as f64 * bin_width;
            let end = start + bin_width;
            let count = values
                .iter()
                .filter(|&&v| {
                    if i == n_bins - 1 {
                        v >= start && v <= end
                    } else {
                        v >= start && v < end
                    }
                })
                .count();
            HistogramBin { start, end, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_matches_pandas_on_known_sample() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let summary = DescriptiveSummary::from_values(&data).unwrap();

        assert_eq!(summary.count, 10);
        assert!((summary.mean - 5.5).abs() < 1e-12);
        assert!((summary.std - 3.027_650_354_097_491_6).abs() < 1e-9);
        assert_eq!(summary.min, 1.0);
        assert!((summary.q1 - 3.25).abs() < 1e-12);
        assert!((summary.median - 5.5).abs() < 1e-12);
        assert!((summary.q3 - 7.75).abs() < 1e-12);
        assert_eq!(summary.max, 10.0);
    }

    #[test]
    fn describe_skips_non_finite() {
        let data = vec![1.0, f64::NAN, 3.0];
        let summary = DescriptiveSummary::from_values(&data).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
    }

    #[test]
    fn describe_empty_is_none() {
        assert!(DescriptiveSummary::from_values(&[]).is_none());
        assert!(DescriptiveSummary::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn value_counts_in_first_appearance_order() {
        let cells = vec![
            Some("b".to_string()),
            Some("a".to_string()),
            None,
            Some("b".to_string()),
        ];
        assert_eq!(
            value_counts(&cells),
            vec![("b".to_string(), 2), ("a".to_string(), 1)]
        );
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let bins = histogram(&values, 4);
        assert_eq!(bins.len(), 4);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());
        // Maximum lands in the final, double-closed bin.
        assert_eq!(bins.last().unwrap().count, 2);
    }

    #[test]
    fn histogram_constant_sample_is_one_bin() {
        let bins = histogram(&[3.0, 3.0, 3.0], 5);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn sturges() {
        assert_eq!(sturges_bin_count(1), 1);
        assert_eq!(sturges_bin_count(100), 8);
    }
}
