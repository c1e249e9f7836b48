use thiserror::Error;

/// Central error type for the stem-restyle-core crate.
#[derive(Debug, Error)]
pub enum RestyleError {
    // Generic fallback (wraps anyhow)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),

    // Codec
    #[error("Invalid channel count: {0}")]
    InvalidChannelCount(u16),

    #[error("Empty payload: no PCM data to decode")]
    EmptyPayload,

    #[error("Channel length mismatch: all channels must have {expected} frames, got {got}")]
    ChannelLengthMismatch { expected: usize, got: usize },

    #[error("Base64 error: {0}")]
    Base64(String),

    // Editing
    #[error("Invalid trim window: start={start}, end={end}")]
    InvalidTrim { start: f32, end: f32 },

    #[error("Empty audio")]
    EmptyAudio,

    #[error("No stem index {0}")]
    StemIndex(usize),

    #[error("No stem dropped for transformation")]
    NoStemDropped,

    // Remote transformation
    #[error("No styles selected")]
    NoStyles,

    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    #[error("API key is missing")]
    MissingApiKey,

    #[error("Remote error: {0}")]
    Remote(String),
}

// --- Implement From conversions for common errors ---
impl From<std::io::Error> for RestyleError {
    fn from(e: std::io::Error) -> Self {
        RestyleError::Anyhow(e.into())
    }
}

impl From<serde_json::Error> for RestyleError {
    fn from(e: serde_json::Error) -> Self {
        RestyleError::Anyhow(e.into())
    }
}

impl From<reqwest::Error> for RestyleError {
    fn from(e: reqwest::Error) -> Self {
        RestyleError::Remote(e.to_string())
    }
}

impl From<hound::Error> for RestyleError {
    fn from(e: hound::Error) -> Self {
        RestyleError::Anyhow(e.into())
    }
}

impl From<symphonia::core::errors::Error> for RestyleError {
    fn from(e: symphonia::core::errors::Error) -> Self {
        RestyleError::Anyhow(e.into())
    }
}

impl From<base64::DecodeError> for RestyleError {
    fn from(e: base64::DecodeError) -> Self {
        RestyleError::Base64(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RestyleError>;
