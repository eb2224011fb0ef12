//! # ACF Tuner
//! *acf_tuner* estimates the fundamental frequency of a sound wave stored in a
//! buffer with the ACF2+ autocorrelation algorithm, and maps it to the nearest
//! equal-tempered note and its deviation in cents.
//!
//! # Layers
//!   * [detector] turns a window of samples into a [PitchEstimate].
//!   * [note] maps frequencies to MIDI notes, cents and note names.
//!   * [tracker] runs both for every frame of a stream and feeds [render] strategies.
//!   * [wav] supplies frames from buffered audio files.
//!
//! # Examples
//! ```
//! use acf_tuner::detector::autocorrelation::AutocorrelationDetector;
//! use acf_tuner::detector::PitchDetector;
//! use acf_tuner::note::{cents_offset, note_from_frequency, pitch_class_name};
//!
//! fn main() {
//!     const SAMPLE_RATE: usize = 44100;
//!     const SIZE: usize = 2048;
//!
//!     // Signal coming from some source (microphone, generated, etc...)
//!     let dt = 1.0 / SAMPLE_RATE as f64;
//!     let freq = 440.0;
//!     let signal: Vec<f64> = (0..SIZE)
//!         .map(|x| 0.5 * (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!
//!     let detector = AutocorrelationDetector::<f64>::default();
//!     let estimate = detector.estimate(&signal, SAMPLE_RATE).unwrap();
//!
//!     if let Some(frequency) = estimate.frequency() {
//!         let note = note_from_frequency(frequency);
//!         println!(
//!             "Frequency: {}, Note: {}, Cents: {}",
//!             frequency,
//!             pitch_class_name(note),
//!             cents_offset(frequency, note)
//!         );
//!     }
//! }
//! ```

pub use detector::autocorrelation::estimate;
pub use detector::PitchEstimate;
pub use error::{EstimateError, SourceError};
pub use note::{cents_offset, frequency_from_note, note_from_frequency, NoteResult};

pub mod config;
pub mod detector;
pub mod error;
pub mod float;
pub mod note;
pub mod render;
pub mod tracker;
pub mod utils;
pub mod wav;
