//! Per-frame pipeline: estimate the pitch of each window, map it to a note
//! and hand the reading to every renderer.

use std::marker::PhantomData;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::detector::autocorrelation::AutocorrelationDetector;
use crate::detector::{PitchDetector, PitchEstimate};
use crate::error::EstimateError;
use crate::float::Float;
use crate::render::{Reading, Renderer};

/// A window of samples and its position in the stream.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a, T> {
    pub elapsed: Duration,
    pub samples: &'a [T],
}

/// Counts of what happened to the frames of one [PitchTracker::track] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackSummary {
    pub frames: usize,
    pub detected: usize,
    pub silent: usize,
    /// Frames dropped because the estimator rejected them.
    pub skipped: usize,
}

pub struct PitchTracker<T, D = AutocorrelationDetector<T>>
where
    T: Float,
    D: PitchDetector<T>,
{
    detector: D,
    sample_rate: usize,
    _sample: PhantomData<T>,
}

impl<T, D> PitchTracker<T, D>
where
    T: Float,
    D: PitchDetector<T>,
{
    pub fn new(detector: D, sample_rate: usize) -> Self {
        debug!("PitchTracker created: sample_rate={}", sample_rate);
        PitchTracker {
            detector,
            sample_rate,
            _sample: PhantomData,
        }
    }

    pub fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    pub fn analyze(&self, frame: Frame<'_, T>) -> Result<Reading<T>, EstimateError> {
        let estimate = self.detector.estimate(frame.samples, self.sample_rate)?;
        Ok(Reading::new(frame.elapsed, estimate))
    }

    /// Analyze every frame in order and render the readings. Frames the
    /// estimator rejects are logged and skipped; the next frame is processed
    /// as usual.
    pub fn track<'a, I>(&self, frames: I, renderers: &mut [&mut dyn Renderer<T>]) -> TrackSummary
    where
        I: IntoIterator<Item = Frame<'a, T>>,
    {
        let mut summary = TrackSummary::default();

        for frame in frames {
            summary.frames += 1;
            let reading = match self.analyze(frame) {
                Ok(reading) => reading,
                Err(err) => {
                    warn!("skipping frame at {:?}: {}", frame.elapsed, err);
                    summary.skipped += 1;
                    continue;
                }
            };

            match reading.estimate {
                PitchEstimate::Detected(_) => summary.detected += 1,
                PitchEstimate::NoPitch => summary.silent += 1,
            }
            trace!("frame at {:?}: {:?}", reading.elapsed, reading.note);

            for renderer in renderers.iter_mut() {
                renderer.render(&reading);
            }
        }

        debug!(
            "tracked {} frames: {} detected, {} silent, {} skipped",
            summary.frames, summary.detected, summary.silent, summary.skipped
        );
        summary
    }
}
