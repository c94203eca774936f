//! Application-level error type.
//!
//! [`AppError`] unifies all internal errors for the application layer.

use crate::config::ConfigError;
use crate::selection::StorageError;
use atrium_client::ApiError;
use atrium_types::ErrorCode;
use thiserror::Error;

/// Unified application error.
///
/// Collects all internal errors into a single type for CLI handling.
///
/// # Example
///
/// ```
/// use atrium_app::{AppError, StorageError};
///
/// // Internal error automatically converts to AppError
/// let storage_err = StorageError::Corrupt(serde_json::from_str::<u8>("x").unwrap_err());
/// let app_err: AppError = storage_err.into();
///
/// // CLI can use Display for user-friendly message
/// eprintln!("Error: {}", app_err);
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// API operation failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted-state error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No project selected yet
    #[error("no project selected; run `atrium projects select <ID>`")]
    NoSelection,

    /// Identity fields missing from config
    #[error("identity not configured; set [user] id/name/email in config or ATRIUM_USER_* env vars")]
    MissingIdentity,
}

impl ErrorCode for AppError {
    fn code(&self) -> &'static str {
        match self {
            Self::Api(e) => e.code(),
            Self::Config(_) => "APP_CONFIG_ERROR",
            Self::Storage(e) => e.code(),
            Self::Io(_) => "APP_IO_ERROR",
            Self::NoSelection => "APP_NO_SELECTION",
            Self::MissingIdentity => "APP_IDENTITY_MISSING",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_recoverable(),
            Self::Config(_) | Self::MissingIdentity => false,
            Self::Storage(e) => e.is_recoverable(),
            // Recoverable by selecting a project.
            Self::Io(_) | Self::NoSelection => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_converts() {
        let corrupt = StorageError::Corrupt(serde_json::from_str::<u8>("x").unwrap_err());
        let app_err: AppError = corrupt.into();
        assert!(matches!(app_err, AppError::Storage(_)));
        assert!(app_err.is_recoverable());
    }

    #[test]
    fn error_codes() {
        let err: AppError = ConfigError::InvalidEnvVar {
            name: "ATRIUM_DEBUG".into(),
            message: "expected bool".into(),
        }
        .into();
        assert_eq!(err.code(), "APP_CONFIG_ERROR");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn precondition_variants_carry_guidance() {
        let err = AppError::NoSelection;
        assert_eq!(err.code(), "APP_NO_SELECTION");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("no project selected"));

        let err = AppError::MissingIdentity;
        assert_eq!(err.code(), "APP_IDENTITY_MISSING");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("identity not configured"));
    }
}
