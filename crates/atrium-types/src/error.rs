//! Unified error interface for Atrium crates.
//!
//! All Atrium error types implement [`ErrorCode`] so that the
//! application layer and the CLI can log and classify failures
//! uniformly without matching on concrete error types.

/// Unified error code interface.
///
/// # Code Format
///
/// Error codes should be:
///
/// - **UPPER_SNAKE_CASE**: e.g. `"API_MISSING_TOKEN"`
/// - **Namespace-prefixed**: `API_`, `APP_`, `CONFIG_`, `STORE_`
/// - **Stable**: codes are an API contract and must not change
///
/// # Recoverability
///
/// An error is recoverable when retrying may succeed or the user can
/// take action to fix it (transient network failure, expired token).
/// Invalid input and permission denials are not recoverable: they will
/// not change on retry.
///
/// # Example
///
/// ```
/// use atrium_types::ErrorCode;
///
/// #[derive(Debug)]
/// enum FetchError {
///     Timeout,
///     Denied,
/// }
///
/// impl ErrorCode for FetchError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Timeout => "FETCH_TIMEOUT",
///             Self::Denied => "FETCH_DENIED",
///         }
///     }
///
///     fn is_recoverable(&self) -> bool {
///         matches!(self, Self::Timeout)
///     }
/// }
///
/// assert_eq!(FetchError::Timeout.code(), "FETCH_TIMEOUT");
/// assert!(FetchError::Timeout.is_recoverable());
/// assert!(!FetchError::Denied.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Machine-readable error code.
    fn code(&self) -> &'static str;

    /// Whether retrying or user action may resolve the error.
    fn is_recoverable(&self) -> bool;
}
