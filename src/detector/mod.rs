use crate::error::EstimateError;
use crate::float::Float;

pub mod autocorrelation;
pub mod internals;

/// Outcome of a single estimation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchEstimate<T>
where
    T: Float,
{
    /// The buffer did not carry enough energy to hold a reliable pitch.
    NoPitch,
    /// Fundamental frequency in Hz; always positive and finite.
    Detected(T),
}

impl<T> PitchEstimate<T>
where
    T: Float,
{
    pub fn frequency(&self) -> Option<T> {
        match *self {
            PitchEstimate::NoPitch => None,
            PitchEstimate::Detected(frequency) => Some(frequency),
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, PitchEstimate::Detected(_))
    }
}

pub trait PitchDetector<T>
where
    T: Float,
{
    fn estimate(
        &self,
        signal: &[T],
        sample_rate: usize,
    ) -> Result<PitchEstimate<T>, EstimateError>;
}
