//! Error types for Cloud Foundry API operations.

use thiserror::Error;

/// Errors that can occur during Cloud Foundry API operations.
#[derive(Debug, Error)]
pub enum CfError {
    /// Configuration is missing or incomplete.
    #[error("Cloud Foundry configuration required: {0}")]
    ConfigMissing(String),

    /// Caller-supplied argument failed validation before dispatch.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Payload could not be parsed or lacked a required field.
    ///
    /// Always carries the offending payload text for diagnosability.
    #[error("malformed payload: {message} (payload: {payload})")]
    Format { message: String, payload: String },

    /// Remote call returned a status code other than the one the
    /// operation expects.
    #[error("unexpected HTTP status {received} (expected {expected}): {body}")]
    UnexpectedStatus {
        expected: u16,
        received: u16,
        body: String,
    },

    /// A bearer-authenticated call was made before `login`.
    #[error("not authenticated: call login() before issuing resource requests")]
    NotAuthenticated,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("Failed to serialize: {0}")]
    JsonError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl CfError {
    /// Build a `Format` error, echoing the raw payload.
    pub(crate) fn format(message: impl Into<String>, payload: impl Into<String>) -> Self {
        CfError::Format {
            message: message.into(),
            payload: payload.into(),
        }
    }
}

/// Result type alias for Cloud Foundry operations.
pub type Result<T> = core::result::Result<T, CfError>;
