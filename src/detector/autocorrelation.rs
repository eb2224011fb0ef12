//! The ACF2+ pitch detector.
//!
//! Let $S=(s_0,s_1,\ldots,s_{N-1})$ be a discrete signal. Its autocorrelation at lag $t$ is
//! $$ r(t) = \sum_{j=0}^{N-t-1} s_j s_{j+t}. $$
//! A periodic signal lines up with itself whenever $t$ is a multiple of its period, so
//! the period shows up as the tallest peak of $r$ after the zero-lag peak.
//!
//! ## Implementation
//! 1. Buffers whose RMS amplitude is below a threshold are reported as silence.
//! 2. Leading and trailing samples are trimmed up to the first quiet sample from each end.
//! 3. $r$ is computed directly, with no FFT, so the cost is quadratic in the buffer length.
//! 4. The initial descending slope of $r$ is skipped and the maximum of the remainder is taken.
//! 5. The peak is refined with quadratic interpolation.

use tracing::{debug, trace};

use crate::config::DetectorConfig;
use crate::detector::internals::{autocorrelation, trim_bounds};
use crate::detector::{PitchDetector, PitchEstimate};
use crate::error::EstimateError;
use crate::float::Float;
use crate::utils::buffer::{new_real_buffer, rms};
use crate::utils::peak::{correct_peak, find_max_peak, skip_descending, PeakCorrection};

/// Fewest samples the trimmed buffer may hold; interpolation needs a peak
/// with a neighbour on each side.
pub const MIN_TRIMMED_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct AutocorrelationDetector<T>
where
    T: Float,
{
    rms_threshold: T,
    trim_threshold: T,
    peak_correction: PeakCorrection,
}

impl<T> AutocorrelationDetector<T>
where
    T: Float,
{
    pub fn new(config: DetectorConfig) -> Self {
        debug!(
            "AutocorrelationDetector created: rms_threshold={}, trim_threshold={}, peak_correction={:?}",
            config.rms_threshold, config.trim_threshold, config.peak_correction
        );
        AutocorrelationDetector {
            rms_threshold: T::from_f64(config.rms_threshold).unwrap(),
            trim_threshold: T::from_f64(config.trim_threshold).unwrap(),
            peak_correction: config.peak_correction,
        }
    }
}

impl<T> Default for AutocorrelationDetector<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl<T> PitchDetector<T> for AutocorrelationDetector<T>
where
    T: Float,
{
    fn estimate(
        &self,
        signal: &[T],
        sample_rate: usize,
    ) -> Result<PitchEstimate<T>, EstimateError> {
        if sample_rate == 0 {
            return Err(EstimateError::InvalidSampleRate);
        }
        if signal.is_empty() {
            return Err(EstimateError::InsufficientSamples { len: 0 });
        }

        let level = rms(signal);
        if level < self.rms_threshold {
            trace!("rms {} below gate, no pitch", level);
            return Ok(PitchEstimate::NoPitch);
        }

        let (start, stop) = trim_bounds(signal, self.trim_threshold);
        let trimmed = &signal[start..stop.max(start)];
        if trimmed.len() < MIN_TRIMMED_LEN {
            return Err(EstimateError::InsufficientSamples { len: trimmed.len() });
        }

        let mut autocorr = new_real_buffer(trimmed.len());
        autocorrelation(trimmed, &mut autocorr);

        let descent = skip_descending(&autocorr);
        let peak = find_max_peak(&autocorr, descent)
            .ok_or(EstimateError::InsufficientSamples { len: trimmed.len() })?;
        let (period, _) = correct_peak(peak, &autocorr, self.peak_correction);

        if !(period > T::zero() && period.is_finite()) {
            return Err(EstimateError::InsufficientSamples { len: trimmed.len() });
        }

        let frequency = T::from_usize(sample_rate).unwrap() / period;
        trace!(
            "trimmed {}..{}, peak lag {} refined to {}, frequency {}",
            start,
            stop,
            peak.0,
            period,
            frequency
        );
        Ok(PitchEstimate::Detected(frequency))
    }
}

/// Estimate the pitch of `signal` with the default thresholds.
pub fn estimate<T>(signal: &[T], sample_rate: usize) -> Result<PitchEstimate<T>, EstimateError>
where
    T: Float,
{
    AutocorrelationDetector::default().estimate(signal, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, amplitude: f64, size: usize, sample_rate: usize) -> Vec<f64> {
        let dx = 2.0 * std::f64::consts::PI * freq / sample_rate as f64;
        (0..size).map(|i| amplitude * (i as f64 * dx).sin()).collect()
    }

    #[test]
    fn quiet_signal_has_no_pitch() {
        let signal = sine(440.0, 0.005, 2048, 44100);
        assert_eq!(estimate(&signal, 44100), Ok(PitchEstimate::NoPitch));
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let signal = sine(440.0, 0.5, 2048, 44100);
        assert_eq!(estimate(&signal, 0), Err(EstimateError::InvalidSampleRate));
    }

    #[test]
    fn empty_buffer_is_insufficient() {
        assert_eq!(
            estimate::<f64>(&[], 44100),
            Err(EstimateError::InsufficientSamples { len: 0 })
        );
    }

    #[test]
    fn short_trim_is_insufficient() {
        // Quiet samples at index 1 from both ends leave only two samples.
        let signal = vec![0.9, 0.1, 0.9, 0.1, 0.9];
        assert_eq!(
            estimate(&signal, 44100),
            Err(EstimateError::InsufficientSamples { len: 2 })
        );
    }

    #[test]
    fn thresholds_come_from_config() {
        let signal = sine(440.0, 0.05, 2048, 44100);
        let strict = AutocorrelationDetector::<f64>::new(DetectorConfig {
            rms_threshold: 0.1,
            ..DetectorConfig::default()
        });
        assert_eq!(strict.estimate(&signal, 44100), Ok(PitchEstimate::NoPitch));
        assert!(estimate(&signal, 44100).unwrap().is_detected());
    }

    #[test]
    fn uncorrected_period_is_an_integer_lag() {
        let signal = sine(440.0, 0.5, 2048, 44100);
        let detector = AutocorrelationDetector::<f64>::new(DetectorConfig {
            peak_correction: PeakCorrection::None,
            ..DetectorConfig::default()
        });
        let frequency = detector.estimate(&signal, 44100).unwrap().frequency().unwrap();
        let period = 44100.0 / frequency;
        assert!((period - period.round()).abs() < 1e-9, "got {}", period);
        assert!((frequency - 440.0).abs() < 10.0, "got {}", frequency);
    }

    #[test]
    fn sine_is_detected() {
        let signal = sine(440.0, 0.5, 2048, 44100);
        let frequency = estimate(&signal, 44100).unwrap().frequency().unwrap();
        assert!((frequency - 440.0).abs() < 4.4, "got {}", frequency);
    }
}
