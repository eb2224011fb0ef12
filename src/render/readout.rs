use std::fmt;

use crate::float::Float;
use crate::render::{Reading, Renderer};

/// Direction and size of the deviation from the nearest note, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detune {
    None,
    Flat(u32),
    Sharp(u32),
}

impl Detune {
    pub fn from_cents(cents: i32) -> Self {
        match cents {
            0 => Detune::None,
            c if c < 0 => Detune::Flat(c.unsigned_abs()),
            c => Detune::Sharp(c.unsigned_abs()),
        }
    }
}

impl fmt::Display for Detune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detune::None => write!(f, "--"),
            Detune::Flat(cents) => write!(f, "{} cents flat", cents),
            Detune::Sharp(cents) => write!(f, "{} cents sharp", cents),
        }
    }
}

/// What a live tuner display shows for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    /// Whether a pitch was detected.
    pub confident: bool,
    /// Rounded frequency in Hz, or `--`.
    pub pitch: String,
    /// Pitch class name, or `-`.
    pub note: String,
    pub detune: Detune,
}

impl Default for Readout {
    fn default() -> Self {
        Readout {
            confident: false,
            pitch: String::from("--"),
            note: String::from("-"),
            detune: Detune::None,
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5} Hz  {:<2}  {}", self.pitch, self.note, self.detune)
    }
}

/// Keeps the readout of the latest reading.
#[derive(Debug, Clone, Default)]
pub struct ReadoutRenderer {
    current: Readout,
}

impl ReadoutRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Readout {
        &self.current
    }
}

impl<T> Renderer<T> for ReadoutRenderer
where
    T: Float,
{
    fn name(&self) -> &'static str {
        "readout"
    }

    fn render(&mut self, reading: &Reading<T>) {
        self.current = match (reading.estimate.frequency(), reading.note) {
            (Some(frequency), Some(note)) => Readout {
                confident: true,
                pitch: format!("{}", frequency.round()),
                note: note.name().to_string(),
                detune: Detune::from_cents(note.cents_offset),
            },
            _ => Readout::default(),
        };
    }
}
