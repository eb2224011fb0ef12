use std::collections::VecDeque;
use std::time::Duration;

use crate::config::PlotConfig;
use crate::float::Float;
use crate::note::notes_in_range;
use crate::render::{Reading, Renderer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub elapsed: Duration,
    /// Vertical position, 0 at the top of the plot.
    pub y: f64,
}

/// A labelled horizontal grid line.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub label: String,
    pub y: f64,
}

/// Frequency over time on a logarithmic axis. Frames without a pitch are
/// plotted at the bottom of the axis.
#[derive(Debug, Clone)]
pub struct FrequencyPlot {
    config: PlotConfig,
    log_min: f64,
    log_max: f64,
    points: VecDeque<PlotPoint>,
}

impl FrequencyPlot {
    pub fn new(config: PlotConfig) -> Self {
        FrequencyPlot {
            log_min: config.min_frequency.ln(),
            log_max: config.max_frequency.ln(),
            config,
            points: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Points inside the time window, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &PlotPoint> {
        self.points.iter()
    }

    /// Vertical position of `frequency`, clamped to the axis. An axis that
    /// fails [PlotConfig::validate] places everything at the bottom.
    pub fn frequency_to_y(&self, frequency: f64) -> f64 {
        let height = self.config.height;
        let span = self.log_max - self.log_min;
        if !(span.is_finite() && span > 0.0) {
            return height;
        }
        let frequency = frequency
            .max(self.config.min_frequency)
            .min(self.config.max_frequency);
        let normalized = (frequency.ln() - self.log_min) / span;
        (height - normalized * height).max(0.0).min(height)
    }

    /// One tick per note between the axis bounds.
    pub fn axis(&self) -> Vec<AxisTick> {
        notes_in_range(self.config.min_frequency, self.config.max_frequency)
            .into_iter()
            .map(|note| AxisTick {
                y: self.frequency_to_y(note.frequency),
                label: note.label,
            })
            .collect()
    }

    pub fn push(&mut self, elapsed: Duration, frequency: f64) {
        let y = self.frequency_to_y(frequency);
        self.points.push_back(PlotPoint { elapsed, y });

        let window = self.config.time_window();
        while let Some(oldest) = self.points.front() {
            if elapsed.saturating_sub(oldest.elapsed) > window {
                self.points.pop_front();
            } else {
                break;
            }
        }
    }
}

impl<T> Renderer<T> for FrequencyPlot
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "plot"
    }

    fn render(&mut self, reading: &Reading<T>) {
        let frequency = reading
            .estimate
            .frequency()
            .and_then(|f| f.to_f64())
            .unwrap_or(0.0);
        self.push(reading.elapsed, frequency);
    }
}
