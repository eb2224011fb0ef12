use crate::float::Float;

/// Bounds `(start, stop)` of `signal` with its leading and trailing loud
/// samples cut off. `start` is the first index in the first half whose
/// magnitude is below `threshold` (0 if none); `stop` is the last such index
/// in the second half (`len - 1` if none). The usable region is `start..stop`.
pub fn trim_bounds<T>(signal: &[T], threshold: T) -> (usize, usize)
where
    T: Float,
{
    let size = signal.len();
    let half = (size + 1) / 2;

    let start = (0..half)
        .find(|&i| signal[i].abs() < threshold)
        .unwrap_or(0);
    let stop = (1..half)
        .find(|&i| signal[size - i].abs() < threshold)
        .map_or(size.saturating_sub(1), |i| size - i);

    (start, stop)
}

/// Compute the autocorrelation of `signal` to `result` directly,
///
/// > r(t) = sum_{j=0}^{n-t-1} x_j*x_{j+t}
///
/// for every lag `t` in `0..n`. This is quadratic in the signal length.
pub fn autocorrelation<T>(signal: &[T], result: &mut [T])
where
    T: Float,
{
    assert!(
        result.len() >= signal.len(),
        "`result` must have a length at least equal to `signal`."
    );

    result
        .iter_mut()
        .take(signal.len())
        .enumerate()
        .for_each(|(lag, r)| {
            *r = signal
                .iter()
                .zip(&signal[lag..])
                .map(|(&a, &b)| a * b)
                .sum();
        });
}
