//! Presentation strategies fed by the tracker.
//!
//! A [Renderer] turns each [Reading] into presentation state: a text readout,
//! points on a scrolling plot, or a trail of recent notes. Renderers only
//! compute what to show; drawing it is left to the caller.
//!
//!   * [ReadoutRenderer][readout::ReadoutRenderer]
//!   * [FrequencyPlot][plot::FrequencyPlot]
//!   * [NoteTrail][trail::NoteTrail]

use std::time::Duration;

use crate::detector::PitchEstimate;
use crate::float::Float;
use crate::note::NoteResult;

pub mod plot;
pub mod readout;
pub mod trail;

/// One analysed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading<T>
where
    T: Float,
{
    /// Position of the frame on the caller's clock.
    pub elapsed: Duration,
    pub estimate: PitchEstimate<T>,
    /// Present exactly when `estimate` is detected.
    pub note: Option<NoteResult>,
}

impl<T> Reading<T>
where
    T: Float,
{
    pub fn new(elapsed: Duration, estimate: PitchEstimate<T>) -> Self {
        let note = estimate.frequency().and_then(NoteResult::from_frequency);
        Reading {
            elapsed,
            estimate,
            note,
        }
    }
}

pub trait Renderer<T>
where
    T: Float,
{
    fn name(&self) -> &'static str;

    fn render(&mut self, reading: &Reading<T>);
}
