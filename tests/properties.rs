use proptest::prelude::*;

use acf_tuner::detector::PitchEstimate;
use acf_tuner::note::{cents_offset, frequency_from_note, note_from_frequency};
use acf_tuner::{estimate, EstimateError};

const LOWEST_NOTE: f64 = 27.5;
const HIGHEST_NOTE: f64 = 4186.0;

proptest! {
    #[test]
    fn quiet_buffers_have_no_pitch(signal in prop::collection::vec(-0.009f64..0.009, 1..1024)) {
        prop_assert_eq!(estimate(&signal, 44100), Ok(PitchEstimate::NoPitch));
    }

    #[test]
    fn estimate_is_deterministic(
        signal in prop::collection::vec(-1.0f64..1.0, 0..300),
        sample_rate in 1usize..96000,
    ) {
        let first = estimate(&signal, sample_rate);
        let second = estimate(&signal, sample_rate);
        match (first, second) {
            (Ok(PitchEstimate::Detected(a)), Ok(PitchEstimate::Detected(b))) => {
                prop_assert_eq!(a.to_bits(), b.to_bits());
                prop_assert!(a > 0.0 && a.is_finite());
            }
            (a, b) => prop_assert_eq!(a, b),
        }
    }

    #[test]
    fn detected_frequencies_are_positive(
        signal in prop::collection::vec(-1.0f32..1.0, 3..300),
    ) {
        match estimate(&signal, 48000) {
            Ok(PitchEstimate::Detected(f)) => prop_assert!(f > 0.0 && f.is_finite()),
            Ok(PitchEstimate::NoPitch) | Err(EstimateError::InsufficientSamples { .. }) => {}
            Err(err) => prop_assert!(false, "unexpected error {}", err),
        }
    }

    #[test]
    fn note_round_trip_within_a_semitone(f in LOWEST_NOTE..HIGHEST_NOTE) {
        let snapped: f64 = frequency_from_note(note_from_frequency(f));
        let semitones = 12.0 * (snapped / f).log2();
        prop_assert!(semitones.abs() <= 0.5 + 1e-9, "{} snapped to {}", f, snapped);
    }

    #[test]
    fn notes_survive_a_round_trip(midi in 0i32..128) {
        prop_assert_eq!(note_from_frequency(frequency_from_note::<f64>(midi)), midi);
        prop_assert_eq!(cents_offset(frequency_from_note::<f64>(midi), midi), 0);
    }
}

#[test]
fn cents_mostly_within_half_a_semitone() {
    const STEPS: usize = 100_000;
    let within = (0..STEPS)
        .map(|i| LOWEST_NOTE + (HIGHEST_NOTE - LOWEST_NOTE) * i as f64 / STEPS as f64)
        .filter(|&f| (-50..=50).contains(&cents_offset(f, note_from_frequency(f))))
        .count();
    assert!(within as f64 >= 0.95 * STEPS as f64, "{} of {}", within, STEPS);
}

#[test]
fn a4_reference() {
    assert_eq!(note_from_frequency(440.0), 69);
    assert_eq!(cents_offset(440.0, 69), 0);
}
