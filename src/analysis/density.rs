use statrs::statistics::Statistics;

// ---------------------------------------------------------------------------
// Gaussian kernel density estimate
// ---------------------------------------------------------------------------

const SQRT_TWO_PI: f64 = 2.506_628_274_631_000_2;

/// Gaussian KDE over a numeric sample, bandwidth by Silverman's rule
/// `1.06 · σ · n^(-1/5)`. Backs the density plot and the range-probability
/// readout on the analysis tab.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    values: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE. `None` when fewer than two finite values remain or the
    /// sample has zero variance (the density would be degenerate).
    pub fn new(values: &[f64]) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.len() < 2 {
            return None;
        }
        let std = finite.iter().std_dev();
        if !(std > 0.0) {
            return None;
        }
        let bandwidth = 1.06 * std * (finite.len() as f64).powf(-0.2);
        Some(GaussianKde {
            values: finite,
            bandwidth,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Sample minimum and maximum.
    pub fn support(&self) -> (f64, f64) {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }

    /// Density at a single point.
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut density = 0.0;
        for &value in &self.values {
            let u = (x - value) / self.bandwidth;
            density += (-0.5 * u * u).exp() / (SQRT_TWO_PI * self.bandwidth);
        }
        density / self.values.len() as f64
    }

    /// Evenly spaced curve samples over `[lo, hi]`, as plot points.
    pub fn curve(&self, lo: f64, hi: f64, steps: usize) -> Vec<[f64; 2]> {
        if steps < 2 || !(hi > lo) {
            return Vec::new();
        }
        (0..steps)
            .map(|i| {
                let x = lo + (hi - lo) * i as f64 / (steps - 1) as f64;
                [x, self.evaluate(x)]
            })
            .collect()
    }

    /// Probability mass between `lo` and `hi`, by trapezoidal integration
    /// of the density. Clamped to `[0, 1]`.
    pub fn mass_between(&self, lo: f64, hi: f64) -> f64 {
        if !(hi > lo) {
            return 0.0;
        }
        let steps = 1000;
        let dx = (hi - lo) / steps as f64;
        let mut mass = 0.0;
        let mut prev = self.evaluate(lo);
        for i in 1..=steps {
            let y = self.evaluate(lo + i as f64 * dx);
            mass += (prev + y) * 0.5 * dx;
            prev = y;
        }
        mass.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_is_non_negative() {
        let kde = GaussianKde::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        for i in -10..=20 {
            assert!(kde.evaluate(i as f64 / 2.0) >= 0.0);
        }
    }

    #[test]
    fn mass_over_full_support_is_close_to_one() {
        let kde = GaussianKde::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        // Pad the support by several bandwidths to capture the tails.
        let (min, max) = kde.support();
        let pad = 6.0 * kde.bandwidth();
        let mass = kde.mass_between(min - pad, max + pad);
        assert!((mass - 1.0).abs() < 0.01, "mass was {mass}");
    }

    #[test]
    fn mass_is_monotone_in_the_interval() {
        let kde = GaussianKde::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let narrow = kde.mass_between(2.0, 3.0);
        let wide = kde.mass_between(1.0, 4.0);
        assert!(wide > narrow);
        assert!((0.0..=1.0).contains(&narrow));
        assert!((0.0..=1.0).contains(&wide));
    }

    #[test]
    fn degenerate_samples_are_rejected() {
        assert!(GaussianKde::new(&[]).is_none());
        assert!(GaussianKde::new(&[1.0]).is_none());
        assert!(GaussianKde::new(&[2.0, 2.0, 2.0]).is_none());
        assert!(GaussianKde::new(&[f64::NAN, 1.0]).is_none());
    }

    #[test]
    fn inverted_interval_has_zero_mass() {
        let kde = GaussianKde::new(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(kde.mass_between(3.0, 1.0), 0.0);
    }

    #[test]
    fn curve_spans_the_requested_range() {
        let kde = GaussianKde::new(&[1.0, 2.0, 3.0]).unwrap();
        let curve = kde.curve(0.0, 4.0, 50);
        assert_eq!(curve.len(), 50);
        assert_eq!(curve.first().unwrap()[0], 0.0);
        assert_eq!(curve.last().unwrap()[0], 4.0);
    }
}
