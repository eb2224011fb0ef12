//! Caller-owned configuration. Every field has a default, so partial JSON
//! documents deserialize with the remaining values filled in.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::utils::peak::PeakCorrection;

/// Thresholds of the autocorrelation detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Buffers with a lower RMS amplitude are reported as silence.
    pub rms_threshold: f64,
    /// Leading and trailing samples are trimmed up to the first sample whose
    /// magnitude falls below this value.
    pub trim_threshold: f64,
    /// Refinement applied to the autocorrelation peak before it becomes a period.
    pub peak_correction: PeakCorrection,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            rms_threshold: 0.01,
            trim_threshold: 0.2,
            peak_correction: PeakCorrection::Quadratic,
        }
    }
}

/// Geometry of the scrolling frequency plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    /// Lowest frequency on the log-scaled axis, in Hz.
    pub min_frequency: f64,
    /// Highest frequency on the log-scaled axis, in Hz.
    pub max_frequency: f64,
    /// How long a point stays on the plot, in milliseconds.
    pub time_window_ms: u64,
}

impl PlotConfig {
    pub fn time_window(&self) -> Duration {
        Duration::from_millis(self.time_window_ms)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 500.0,
            min_frequency: 87.0,
            max_frequency: 700.0,
            time_window_ms: 5000,
        }
    }
}

/// Geometry of the note trail, a scatter of recent notes joined to their
/// near neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub width: f64,
    pub height: f64,
    pub min_frequency: f64,
    pub max_frequency: f64,
    pub time_window_ms: u64,
    /// Two points closer than this are connected.
    pub proximity: f64,
    /// Upper bound on connections drawn from a single point.
    pub max_connections: usize,
}

impl TrailConfig {
    pub fn time_window(&self) -> Duration {
        Duration::from_millis(self.time_window_ms)
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        let plot = PlotConfig::default();
        Self {
            width: plot.width,
            height: plot.height,
            min_frequency: plot.min_frequency,
            max_frequency: plot.max_frequency,
            time_window_ms: plot.time_window_ms,
            proximity: 50.0,
            max_connections: 5,
        }
    }
}

/// Everything the tuner binary needs to run over a buffered signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    /// Samples per analysis window.
    pub window_size: usize,
    /// Samples between the starts of consecutive windows.
    pub hop_size: usize,
    pub detector: DetectorConfig,
    pub plot: PlotConfig,
    pub trail: TrailConfig,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 2048,
            detector: DetectorConfig::default(),
            plot: PlotConfig::default(),
            trail: TrailConfig::default(),
        }
    }
}

/// A frequency axis must be a positive, finite, increasing range, and points
/// must stay on it for a non-zero time.
fn validate_axis(
    section: &str,
    min_frequency: f64,
    max_frequency: f64,
    time_window_ms: u64,
) -> Result<(), SourceError> {
    if !(min_frequency > 0.0 && max_frequency.is_finite() && min_frequency < max_frequency) {
        return Err(SourceError::InvalidConfig(format!(
            "{}: frequency range must satisfy 0 < min < max, got {}..{}",
            section, min_frequency, max_frequency
        )));
    }
    if time_window_ms == 0 {
        return Err(SourceError::InvalidConfig(format!(
            "{}: time_window_ms must be positive",
            section
        )));
    }
    Ok(())
}

impl PlotConfig {
    pub fn validate(&self) -> Result<(), SourceError> {
        validate_axis("plot", self.min_frequency, self.max_frequency, self.time_window_ms)
    }
}

impl TrailConfig {
    pub fn validate(&self) -> Result<(), SourceError> {
        validate_axis("trail", self.min_frequency, self.max_frequency, self.time_window_ms)
    }
}

impl TunerConfig {
    /// Load a config from JSON and check it with [TunerConfig::validate].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let reader = BufReader::new(File::open(path)?);
        let config: TunerConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the framing and the renderers cannot work with.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.window_size < 3 {
            return Err(SourceError::InvalidConfig(format!(
                "window_size must be at least 3, got {}",
                self.window_size
            )));
        }
        if self.hop_size == 0 {
            return Err(SourceError::InvalidConfig(
                "hop_size must be positive".to_string(),
            ));
        }
        self.plot.validate()?;
        self.trail.validate()
    }
}
