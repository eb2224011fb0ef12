use std::collections::VecDeque;
use std::time::Duration;

use crate::config::TrailConfig;
use crate::float::Float;
use crate::note::{cents_offset, note_from_frequency, notes_in_range};
use crate::render::{Reading, Renderer};

#[derive(Debug, Clone, Copy, PartialEq)]
struct TrailEntry {
    elapsed: Duration,
    frequency: f64,
    clarity: f64,
}

/// A recent note placed on the trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    /// Distance from the right edge, growing with age.
    pub x: f64,
    pub y: f64,
    pub color: [u8; 3],
    pub opacity: f64,
}

/// Recently detected notes, positioned by age and pitch and coloured by
/// pitch class.
#[derive(Debug, Clone)]
pub struct NoteTrail {
    config: TrailConfig,
    min_midi: i32,
    max_midi: i32,
    entries: VecDeque<TrailEntry>,
}

impl NoteTrail {
    pub fn new(config: TrailConfig) -> Self {
        let notes = notes_in_range(config.min_frequency, config.max_frequency);
        let min_midi = notes.first().map_or(0, |n| n.midi);
        let max_midi = notes.last().map_or(min_midi, |n| n.midi);
        NoteTrail {
            config,
            min_midi,
            max_midi,
            entries: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict(&mut self, now: Duration) {
        let window = self.config.time_window();
        while let Some(oldest) = self.entries.front() {
            if now.saturating_sub(oldest.elapsed) > window {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    fn note_to_y(&self, note: f64) -> f64 {
        let span = f64::from(self.max_midi - self.min_midi);
        if span == 0.0 {
            return self.config.height;
        }
        let normalized = (note - f64::from(self.min_midi)) / span;
        self.config.height - normalized * self.config.height
    }

    /// Places every entry relative to `now`.
    pub fn points(&self, now: Duration) -> Vec<TrailPoint> {
        let window = self.config.time_window().as_secs_f64();
        self.entries
            .iter()
            .map(|entry| {
                let note = note_from_frequency(entry.frequency);
                let cents = cents_offset(entry.frequency, note);
                let age = now.saturating_sub(entry.elapsed).as_secs_f64();
                let x = if window > 0.0 {
                    age / window * self.config.width
                } else {
                    0.0
                };
                TrailPoint {
                    x,
                    y: self.note_to_y(f64::from(note) + f64::from(cents) / 100.0),
                    color: color_from_note(note),
                    opacity: (entry.clarity * 0.5).min(1.0),
                }
            })
            .collect()
    }

    /// Pairs of indices into `points` close enough to be joined. Each point
    /// connects forward to at most `max_connections` later points.
    pub fn connections(&self, points: &[TrailPoint]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in points.iter().enumerate() {
            let near = points
                .iter()
                .enumerate()
                .skip(i + 1)
                .filter(|(_, b)| (a.x - b.x).hypot(a.y - b.y) <= self.config.proximity)
                .take(self.config.max_connections)
                .map(|(j, _)| (i, j));
            pairs.extend(near);
        }
        pairs
    }
}

impl<T> Renderer<T> for NoteTrail
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "trail"
    }

    fn render(&mut self, reading: &Reading<T>) {
        if let (Some(frequency), Some(_)) = (reading.estimate.frequency(), reading.note) {
            if let Some(frequency) = frequency.to_f64() {
                self.entries.push_back(TrailEntry {
                    elapsed: reading.elapsed,
                    frequency,
                    clarity: 1.0,
                });
            }
        }
        self.evict(reading.elapsed);
    }
}

/// A fully saturated colour whose hue cycles once per octave.
pub fn color_from_note(midi_number: i32) -> [u8; 3] {
    let hue = f64::from(midi_number.rem_euclid(12) * 30);
    hsl_to_rgb(hue, 100.0, 50.0)
}

/// Convert hue in degrees and saturation / lightness in percent to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let s = s / 100.0;
    let l = l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if (0.0..60.0).contains(&h) => (c, x, 0.0),
        h if (60.0..120.0).contains(&h) => (x, c, 0.0),
        h if (120.0..180.0).contains(&h) => (0.0, c, x),
        h if (180.0..240.0).contains(&h) => (0.0, x, c),
        h if (240.0..300.0).contains(&h) => (x, 0.0, c),
        h if (300.0..360.0).contains(&h) => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let channel = |v: f64| ((v + m) * 255.0).round() as u8;
    [channel(r), channel(g), channel(b)]
}
