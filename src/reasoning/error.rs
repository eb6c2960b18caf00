//! Reasoning service error types

use thiserror::Error;

/// Errors that can occur while talking to the reasoning service
///
/// The loop engine performs no catching or retry; any of these unwinds the
/// in-flight run and reaches the caller unmodified.
#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
