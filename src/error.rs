use thiserror::Error;

/// Failure of a single estimation call. Silence is not an error; see
/// [`PitchEstimate::NoPitch`](crate::detector::PitchEstimate::NoPitch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// The buffer was empty, too short after trimming, or produced no usable period.
    #[error("insufficient samples: {len} usable after trimming, at least 3 required")]
    InsufficientSamples { len: usize },

    #[error("sample rate must be positive")]
    InvalidSampleRate,
}

/// Errors raised while loading buffered audio or configuration.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("audio source contains no samples")]
    Empty,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
