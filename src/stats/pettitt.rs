//! Pettitt non-parametric change-point test.
//!
//! A ranked two-sample test for a single change point in a series: the
//! statistic U_t compares how observations up to t rank against those after
//! t; the most extreme |U_t| marks the candidate change point, with an
//! approximate significance level.

/// Result of a Pettitt change-point test.
#[derive(Debug, Clone, PartialEq)]
pub struct PettittResult {
    /// Index of the last observation of the first segment.
    pub change_point: usize,
    /// Test statistic K = max |U_t|.
    pub statistic: f64,
    /// Approximate two-sided p-value: 2 exp(-6K² / (n³ + n²)).
    pub p_value: f64,
    /// Whether the change point is significant at the given alpha.
    pub significant: bool,
}

/// Run the Pettitt test on a series.
///
/// Returns `None` for fewer than two observations or an alpha outside
/// `(0, 1)`.
pub fn pettitt_test(values: &[f64], alpha: f64) -> Option<PettittResult> {
    let n = values.len();
    if n < 2 || !(0.0..1.0).contains(&alpha) || alpha == 0.0 {
        return None;
    }

    // U_t = U_{t-1} + sum_j sign(x_t - x_j); a single O(n^2) pass
    let mut best_t = 0;
    let mut best_abs = f64::NEG_INFINITY;
    let mut u = 0.0;
    for t in 0..n - 1 {
        let mut v_t = 0.0;
        for j in 0..n {
            v_t += sign(values[t] - values[j]);
        }
        u += v_t;
        if u.abs() > best_abs {
            best_abs = u.abs();
            best_t = t;
        }
    }

    let nf = n as f64;
    let p_value = (2.0 * (-6.0 * best_abs * best_abs / (nf.powi(3) + nf.powi(2))).exp()).min(1.0);

    Some(PettittResult {
        change_point: best_t,
        statistic: best_abs,
        p_value,
        significant: p_value < alpha,
    })
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_clear_step_change() {
        let mut values = vec![10.0, 11.0, 9.0, 10.5, 9.5, 10.2, 9.8, 10.1];
        values.extend([30.0, 31.0, 29.0, 30.5, 29.5, 30.2, 29.8, 30.1]);

        let result = pettitt_test(&values, 0.05).unwrap();
        assert_eq!(result.change_point, 7);
        assert!(result.significant, "p = {}", result.p_value);
    }

    #[test]
    fn homogeneous_series_is_not_significant() {
        // Alternating values around a stable level
        let values: Vec<f64> = (0..20)
            .map(|i| 10.0 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();

        let result = pettitt_test(&values, 0.05).unwrap();
        assert!(!result.significant, "p = {}", result.p_value);
    }

    #[test]
    fn p_value_is_clamped_to_unit_interval() {
        let values = vec![1.0, 1.0, 1.0, 1.0];
        let result = pettitt_test(&values, 0.05).unwrap();
        assert!(result.p_value <= 1.0);
        assert!(result.p_value >= 0.0);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(pettitt_test(&[1.0], 0.05).is_none());
        assert!(pettitt_test(&[], 0.05).is_none());
        assert!(pettitt_test(&[1.0, 2.0, 3.0], 0.0).is_none());
        assert!(pettitt_test(&[1.0, 2.0, 3.0], 1.5).is_none());
    }

    #[test]
    fn statistic_matches_direct_computation() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let n = values.len();

        // Direct double sum for each t
        let mut expected_best = f64::NEG_INFINITY;
        for t in 0..n - 1 {
            let mut u = 0.0;
            for i in 0..=t {
                for j in t + 1..n {
                    u += sign(values[i] - values[j]);
                }
            }
            expected_best = expected_best.max(u.abs());
        }

        let result = pettitt_test(&values, 0.05).unwrap();
        assert_eq!(result.statistic, expected_best);
    }
}
