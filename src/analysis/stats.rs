// src/analysis/stats.rs

//! Descriptive statistics over daily demand figures.

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| f64::from(v)).sum();
    Some(sum / values.len() as f64)
}

/// Sample standard deviation (divisor N - 1).
///
/// With fewer than two observations the spread is undefined and 0.0 is
/// returned instead of NaN.
pub fn sample_std_dev(values: &[u32]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    // n >= 2 here, so the mean exists
    let mu = mean(values).unwrap_or(0.0);

    let sum_sq: f64 = values
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - mu;
            diff * diff
        })
        .sum();

    (sum_sq / (n - 1) as f64).sqrt()
}

/// Approximate Inverse Cumulative Distribution Function (Quantile function) for Standard Normal Distribution.
///
/// Turns a target in-stock probability (e.g. 0.93) into the service z-score
/// when no named service level fits.
///
/// Based on Abramowitz and Stegun formula 26.2.23.
/// The absolute error is less than 4.5e-4.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    // Cap at a reasonable sigma outside the open interval
    if p >= 1.0 {
        return 5.0;
    }
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    // Formula is valid for 0 < p <= 0.5; mirror the upper half
    let q = if p < 0.5 { p } else { 1.0 - p };

    let t = (-2.0 * q.ln()).sqrt();

    let c0 = 2.515517;
    let c1 = 0.802853;
    let c2 = 0.010328;

    let d1 = 1.432788;
    let d2 = 0.189269;
    let d3 = 0.001308;

    let numerator = c0 + c1 * t + c2 * t * t;
    let denominator = 1.0 + d1 * t + d2 * t * t + d3 * t * t * t;

    let x = t - (numerator / denominator);

    if p < 0.5 {
        -x
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[3, 5]), Some(4.0));
    }

    #[test]
    fn sample_std_dev_uses_n_minus_one() {
        // Sum of squared deviations is 32 over 8 points
        let values = [2, 4, 4, 4, 5, 5, 7, 9];
        let expected = (32.0_f64 / 7.0).sqrt();

        assert!((sample_std_dev(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn sample_std_dev_of_single_point_is_zero() {
        assert_eq!(sample_std_dev(&[42]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
    }

    #[test]
    fn inverse_cdf_matches_known_quantiles() {
        assert!((inverse_normal_cdf(0.95) - 1.6449).abs() < 1e-3);
        assert!((inverse_normal_cdf(0.975) - 1.9600).abs() < 1e-3);
        assert!((inverse_normal_cdf(0.05) + 1.6449).abs() < 1e-3);
        assert_eq!(inverse_normal_cdf(0.5), 0.0);
        assert_eq!(inverse_normal_cdf(1.0), 5.0);
    }
}
