// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Keep only the rows where both cells are present and finite.
pub fn paired(xs: &[Option<f64>], ys: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    let mut x_out = Vec::new();
    let mut y_out = Vec::new();
    for (x, y) in xs.iter().zip(ys.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            if x.is_finite() && y.is_finite() {
                x_out.push(*x);
                y_out.push(*y);
            }
        }
    }
    (x_out, y_out)
}

/// Pearson correlation coefficient. `None` on length mismatch, fewer than
/// two pairs, or zero variance on either side — reported as undefined
/// rather than returning NaN.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..x.len() {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        None
    } else {
        Some(cov / (var_x.sqrt() * var_y.sqrt()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_linear_is_one() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let r = pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_inverse_is_minus_one() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![8.0, 6.0, 4.0, 2.0];
        let r = pearson(&x, &y).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_side_is_undefined() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![5.0, 5.0, 5.0];
        assert_eq!(pearson(&x, &y), None);
        assert_eq!(pearson(&y, &x), None);
    }

    #[test]
    fn short_or_mismatched_input_is_undefined() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn pairing_drops_incomplete_rows() {
        let xs = vec![Some(1.0), None, Some(3.0), Some(f64::NAN)];
        let ys = vec![Some(2.0), Some(9.9), None, Some(4.0)];
        let (x, y) = paired(&xs, &ys);
        assert_eq!(x, vec![1.0]);
        assert_eq!(y, vec![2.0]);
    }

    #[test]
    fn correlation_is_symmetric() {
        let x = vec![1.0, 4.0, 2.0, 8.0, 5.0];
        let y = vec![3.0, 1.0, 4.0, 9.0, 2.0];
        let forward = pearson(&x, &y).unwrap();
        let backward = pearson(&y, &x).unwrap();
        assert!((forward - backward).abs() < 1e-12);
    }
}
