use crate::float::Float;

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

/// Compute the sum of the square of each element of `arr`.
pub fn square_sum<T>(arr: &[T]) -> T
where
    T: Float,
{
    arr.iter().map(|&s| s * s).sum::<T>()
}

/// Root-mean-square amplitude of `arr`. An empty slice has no energy.
pub fn rms<T>(arr: &[T]) -> T
where
    T: Float,
{
    if arr.is_empty() {
        return T::zero();
    }
    (square_sum(arr) / T::from_usize(arr.len()).unwrap()).sqrt()
}
