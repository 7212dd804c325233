//! Numeric helpers shared by the strategies and the simulation loop.

/// Additive stabilizer used in every per-arm division by a pull count.
///
/// This is an approximation, not a guard: an unpulled arm gets an average of
/// `0 / 1e-6 = 0` and a confidence-bound denominator of `1e-6`, i.e. a very
/// large but finite exploration bonus. Pulled arms are biased by a relative
/// error of about `1e-6 / n`.
pub const PULL_STABILIZER: f64 = 1e-6;

/// Stabilized average `total / (pulls + PULL_STABILIZER)`.
///
/// # Example
///
/// ```rust
/// use banditsim::stabilized_average;
///
/// assert_eq!(stabilized_average(0.0, 0), 0.0);
/// assert!((stabilized_average(5.0, 2) - 2.5).abs() < 1e-5);
/// ```
pub fn stabilized_average(total: f64, pulls: u64) -> f64 {
    total / (pulls as f64 + PULL_STABILIZER)
}

/// Index of the maximum value, ties broken by the lowest index.
///
/// Comparisons are strict, so a later element only wins when it is strictly
/// greater. NaN entries never win. Returns `None` for an empty slice or a
/// slice of NaNs.
///
/// # Example
///
/// ```rust
/// use banditsim::argmax_first;
///
/// assert_eq!(argmax_first(&[1.0, 3.0, 3.0]), Some(1));
/// assert_eq!(argmax_first(&[]), None);
/// ```
pub fn argmax_first(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
