//! Two-sided exact binomial test.

use statrs::distribution::{Binomial, Discrete};

/// Two-sided exact binomial test.
///
/// Tests whether `successes` out of `trials` is consistent with success
/// probability `p`: the p-value is the total probability of all outcomes no
/// more likely than the observed one. Returns NaN for zero trials or an
/// invalid `p`; degenerate probabilities (0 or 1) short-circuit.
pub fn binomial_test_two_sided(successes: u64, trials: u64, p: f64) -> f64 {
    if trials == 0 || successes > trials || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return if successes == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if successes == trials { 1.0 } else { 0.0 };
    }

    let dist = match Binomial::new(p, trials) {
        Ok(d) => d,
        Err(_) => return f64::NAN,
    };

    // Sum the probability of every outcome at most as likely as the
    // observed one; the small relative slack absorbs floating-point noise
    // in the pmf comparison.
    let observed = dist.pmf(successes);
    let cutoff = observed * (1.0 + 1e-7);
    let p_value: f64 = (0..=trials)
        .map(|k| dist.pmf(k))
        .filter(|&prob| prob <= cutoff)
        .sum();

    p_value.min(1.0)
}
