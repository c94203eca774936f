//! API error taxonomy.

use atrium_types::ErrorCode;
use thiserror::Error;

/// Error from an external API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The identity provider produced no bearer token. The operation
    /// was aborted before any request was built.
    #[error("no auth token available")]
    MissingToken,

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic fallback.
        message: String,
    },

    /// The request never completed (DNS, connection, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response completed but its body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Classifies a non-success status with its server message.
    pub(crate) fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Server-facing message suitable for inline display in forms,
    /// falling back to a generic one for transport-level failures.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => "Something went wrong.".to_string(),
        }
    }
}

impl ErrorCode for ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "API_MISSING_TOKEN",
            Self::Status { .. } => "API_STATUS",
            Self::Transport(_) => "API_TRANSPORT",
            Self::Decode(_) => "API_DECODE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // A fresh sign-in produces a token.
            Self::MissingToken => true,
            // Server-side and throttling failures may clear on retry;
            // 4xx client errors won't.
            Self::Status { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            Self::Transport(_) => true,
            Self::Decode(_) => false,
        }
    }
}
