use crate::factorial::Factorial;

/// Probability of exactly `k` events under a Poisson distribution with mean `lambda`.
///
/// Evaluated in the log domain so that large `k` does not overflow the intermediate terms.
/// A zero `lambda` degenerates to a spike at `k = 0`.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    if lambda == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    f64::exp(k as f64 * lambda.ln() - lambda - factorial.ln(k))
}

/// Mass function for `k` in `0..=bound`.
pub fn marginal(bound: u8, lambda: f64, factorial: &impl Factorial) -> Vec<f64> {
    (0..=bound)
        .map(|k| univariate(k, lambda, factorial))
        .collect()
}
