//! Buffered audio from WAV files, cut into fixed-size analysis windows.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::error::SourceError;
use crate::float::Float;
use crate::tracker::Frame;

/// Mono samples and the rate they were recorded at.
#[derive(Debug, Clone)]
pub struct Signal<T> {
    pub sample_rate: usize,
    pub data: Vec<T>,
}

impl<T> Signal<T>
where
    T: Float,
{
    /// Playing time of the samples; zero when the sample rate is unknown (0).
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.data.len() as f64 / self.sample_rate as f64)
    }
}

/// Open the WAV file at `path`; see [read_signal_from].
pub fn read_signal<T, P>(path: P) -> Result<Signal<T>, SourceError>
where
    T: Float,
    P: AsRef<Path>,
{
    debug!("Opening \"{}\"", path.as_ref().display());
    read_signal_from(WavReader::open(path)?)
}

/// Decode every sample of `reader` into a mono signal. Integer samples are
/// scaled to [-1, 1] and channels are averaged.
pub fn read_signal_from<T, R>(mut reader: WavReader<R>) -> Result<Signal<T>, SourceError>
where
    T: Float,
    R: Read,
{
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = f64::from(1u32 << (spec.bits_per_sample.clamp(1, 32) - 1));
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / scale))
                .collect::<Result<_, _>>()?
        }
    };

    if interleaved.is_empty() {
        return Err(SourceError::Empty);
    }

    let data: Vec<T> = interleaved
        .chunks(channels)
        .map(|frame| {
            let mean = frame.iter().sum::<f64>() / frame.len() as f64;
            T::from_f64(mean).unwrap()
        })
        .collect();

    debug!(
        "decoded {} samples at {} Hz from {} channel(s)",
        data.len(),
        spec.sample_rate,
        channels
    );

    Ok(Signal {
        sample_rate: spec.sample_rate as usize,
        data,
    })
}

/// Consecutive full windows of `window` samples, `hop` samples apart. A
/// trailing partial window is dropped.
pub fn frames<T>(signal: &Signal<T>, window: usize, hop: usize) -> impl Iterator<Item = Frame<'_, T>>
where
    T: Float,
{
    assert!(window > 0 && hop > 0, "window and hop must be positive");
    let sample_rate = signal.sample_rate.max(1) as f64;
    let count = if signal.data.len() >= window {
        (signal.data.len() - window) / hop + 1
    } else {
        0
    };

    (0..count).map(move |i| {
        let start = i * hop;
        Frame {
            elapsed: Duration::from_secs_f64(start as f64 / sample_rate),
            samples: &signal.data[start..start + window],
        }
    })
}
