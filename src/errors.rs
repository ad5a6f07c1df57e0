// src/errors.rs

use thiserror::Error;

pub type ConfabResult<T> = Result<T, ConfabError>;

/// Errors raised outside the send flow (startup, config, terminal).
#[derive(Debug, Error)]
pub enum ConfabError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfabError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ConfabError::Config(msg.into())
    }
}

/// Errors produced by a single backend call. These never propagate out of
/// the send task; they are rendered as a bot-styled bubble instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend returned HTTP {status}")]
    Server { status: u16 },

    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
}
