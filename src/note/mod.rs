//! Mapping between frequencies and equal-tempered notes.
//!
//! Notes are MIDI numbers: A4 is 69 and sounds at 440 Hz, with 12 numbers per
//! octave. Deviations are reported in cents, hundredths of a semitone.
//!
//! [cents_offset] floors while [note_from_frequency] rounds. Near a half-semitone
//! boundary the two can disagree and report an offset just past -50 cents.

use crate::float::Float;

/// Reference pitch of A4, in Hz.
pub const A4_FREQUENCY: f64 = 440.0;
/// MIDI number of A4.
pub const A4_MIDI: i32 = 69;

pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Nearest note and the deviation from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteResult {
    pub midi_number: i32,
    pub cents_offset: i32,
}

impl NoteResult {
    /// Nearest note to `frequency`, or `None` if `frequency` is not positive and finite.
    pub fn from_frequency<T: Float>(frequency: T) -> Option<Self> {
        if !(frequency > T::zero() && frequency.is_finite()) {
            return None;
        }
        let midi_number = note_from_frequency(frequency);
        Some(NoteResult {
            midi_number,
            cents_offset: cents_offset(frequency, midi_number),
        })
    }

    pub fn name(&self) -> &'static str {
        pitch_class_name(self.midi_number)
    }
}

/// A note with its frequency and printable label, e.g. `A4`.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteLabel {
    pub midi: i32,
    pub frequency: f64,
    pub label: String,
}

fn log2_ratio<T: Float>(frequency: T, reference: T) -> T {
    (frequency / reference).log2()
}

/// Nearest MIDI note to `frequency`.
///
/// # Panics
/// If `frequency` is not positive and finite.
pub fn note_from_frequency<T: Float>(frequency: T) -> i32 {
    assert!(
        frequency > T::zero() && frequency.is_finite(),
        "frequency must be positive and finite, got {}",
        frequency
    );
    let semitones =
        T::from_f64(12.0).unwrap() * log2_ratio(frequency, T::from_f64(A4_FREQUENCY).unwrap());
    semitones.round().to_i32().unwrap() + A4_MIDI
}

/// Frequency of `midi_number` in Hz; the exact inverse of [note_from_frequency].
///
/// Defined for every `i32`: notes far outside the audible range underflow to
/// zero or overflow to infinity.
pub fn frequency_from_note<T: Float>(midi_number: i32) -> T {
    let semitones = T::from_i32(midi_number).unwrap() - T::from_i32(A4_MIDI).unwrap();
    T::from_f64(A4_FREQUENCY).unwrap() * (semitones / T::from_f64(12.0).unwrap()).exp2()
}

/// Deviation of `frequency` from `midi_number` in cents, floored.
///
/// Offsets beyond the `i32` range saturate to `i32::MIN` or `i32::MAX`
/// by sign; an undefined offset (NaN) is 0.
pub fn cents_offset<T: Float>(frequency: T, midi_number: i32) -> i32 {
    let cents = (T::from_f64(1200.0).unwrap()
        * log2_ratio(frequency, frequency_from_note::<T>(midi_number)))
    .floor();
    if cents.is_nan() {
        return 0;
    }
    cents.to_i32().unwrap_or(if cents > T::zero() {
        i32::MAX
    } else {
        i32::MIN
    })
}

/// Pitch class of `midi_number`, one of [NOTE_NAMES].
pub fn pitch_class_name(midi_number: i32) -> &'static str {
    NOTE_NAMES[midi_number.rem_euclid(12) as usize]
}

/// Pitch class and octave, with C4 as MIDI 60.
pub fn note_label(midi_number: i32) -> String {
    let octave = midi_number.div_euclid(12) - 1;
    format!("{}{}", pitch_class_name(midi_number), octave)
}

/// Every note from C0 to C8 whose frequency lies in `min_frequency..=max_frequency`.
pub fn notes_in_range(min_frequency: f64, max_frequency: f64) -> Vec<NoteLabel> {
    (12..=108)
        .filter_map(|midi| {
            let frequency = frequency_from_note::<f64>(midi);
            (frequency >= min_frequency && frequency <= max_frequency).then(|| NoteLabel {
                midi,
                frequency,
                label: note_label(midi),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_reference() {
        assert_eq!(note_from_frequency(440.0), 69);
        assert_eq!(note_from_frequency(440.0f32), 69);
        assert_eq!(cents_offset(440.0, 69), 0);
        assert_eq!(frequency_from_note::<f64>(69), 440.0);
        assert_eq!(frequency_from_note::<f64>(81), 880.0);
        assert_eq!(frequency_from_note::<f64>(57), 220.0);
    }

    #[test]
    fn rounds_to_nearest_note() {
        assert_eq!(note_from_frequency(261.63), 60);
        assert_eq!(note_from_frequency(27.5), 21);
        assert_eq!(note_from_frequency(4186.01), 108);
        // 25 cents sharp of A4 still maps to A4.
        assert_eq!(note_from_frequency(440.0 * 2f64.powf(25.0 / 1200.0)), 69);
    }

    #[test]
    fn cents_are_floored() {
        let sharp = 440.0 * 2f64.powf(10.5 / 1200.0);
        assert_eq!(cents_offset(sharp, 69), 10);
        let flat = 440.0 * 2f64.powf(-10.5 / 1200.0);
        assert_eq!(cents_offset(flat, 69), -11);
    }

    #[test]
    fn extreme_notes_are_defined() {
        assert_eq!(frequency_from_note::<f64>(i32::MIN), 0.0);
        assert_eq!(frequency_from_note::<f64>(i32::MAX), f64::INFINITY);
        assert_eq!(frequency_from_note::<f32>(-2000), 0.0);

        // The reference underflows to 0 Hz, so 440 Hz is infinitely sharp.
        assert_eq!(cents_offset(440.0f32, -2000), i32::MAX);
        // The reference overflows, so 440 Hz is infinitely flat.
        assert_eq!(cents_offset(440.0f32, 2000), i32::MIN);
        assert_eq!(cents_offset(440.0, i32::MIN), i32::MAX);
        assert_eq!(cents_offset(440.0, i32::MAX), i32::MIN);
        assert_eq!(cents_offset(f64::NAN, 69), 0);
    }

    #[test]
    fn names_and_labels() {
        assert_eq!(pitch_class_name(69), "A");
        assert_eq!(pitch_class_name(61), "C#");
        assert_eq!(pitch_class_name(-1), "B");
        assert_eq!(note_label(60), "C4");
        assert_eq!(note_label(69), "A4");
        assert_eq!(note_label(12), "C0");
        assert_eq!(note_label(11), "B-1");
    }

    #[test]
    fn note_result_checks_input() {
        assert_eq!(NoteResult::from_frequency(0.0), None);
        assert_eq!(NoteResult::from_frequency(f64::NAN), None);
        assert_eq!(NoteResult::from_frequency(-440.0), None);
        let note = NoteResult::from_frequency(440.0).unwrap();
        assert_eq!(
            note,
            NoteResult {
                midi_number: 69,
                cents_offset: 0
            }
        );
        assert_eq!(note.name(), "A");
    }

    #[test]
    fn notes_in_plot_range() {
        let notes = notes_in_range(87.0, 700.0);
        // F2 (87.31 Hz) through F5 (698.46 Hz).
        assert_eq!(notes.first().unwrap().label, "F2");
        assert_eq!(notes.last().unwrap().label, "F5");
        assert_eq!(notes.len(), 37);
        assert!(notes.windows(2).all(|w| w[0].midi + 1 == w[1].midi));
    }

    #[test]
    #[should_panic]
    fn zero_frequency_panics() {
        note_from_frequency(0.0);
    }
}
