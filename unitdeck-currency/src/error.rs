//! Rate fetch errors
//!
//! None of these are fatal: the refresher logs them and keeps serving the
//! last good table.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    #[error("rate provider is not configured: {0}")]
    Config(String),

    #[error("rate request failed: {0}")]
    Transport(String),

    #[error("rate provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("rate payload could not be decoded: {0}")]
    Decode(String),

    #[error("rate payload has no usable rates")]
    Empty,
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
