//! Fallible construction trait for validated types.
//!
//! # When to Use Which Pattern
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds (infallible) |
//! | [`TryNew`] | Construction requires validation (fallible) |
//! | `TryFrom<T>` | Converting from another type (fallible) |
//! | `Default` | Sensible default value exists |
//!
//! Following Rust's naming conventions, `try_new()` mirrors the
//! standard library's `TryFrom`/`TryInto` pattern for constructors
//! that validate rather than convert.

/// Trait for fallible construction with validation.
///
/// Implement this trait when construction requires validation that may
/// fail and you are not converting from another type (use `TryFrom`
/// for conversions). Types implementing `TryNew` should NOT also have
/// a plain `new()` performing the same validation; the `try_` prefix
/// makes fallibility explicit at the call site.
///
/// # Example
///
/// ```
/// use atrium_types::TryNew;
///
/// #[derive(Debug)]
/// struct NonBlank(String);
///
/// #[derive(Debug, PartialEq)]
/// struct BlankError;
///
/// impl TryNew for NonBlank {
///     type Error = BlankError;
///     type Args = String;
///
///     fn try_new(value: String) -> Result<Self, Self::Error> {
///         if value.trim().is_empty() {
///             return Err(BlankError);
///         }
///         Ok(NonBlank(value))
///     }
/// }
///
/// assert!(NonBlank::try_new("ok".to_string()).is_ok());
/// assert_eq!(NonBlank::try_new("  ".to_string()).unwrap_err(), BlankError);
/// ```
pub trait TryNew {
    /// The error type returned when validation fails.
    type Error;

    /// Arguments required for construction (use a tuple for several).
    type Args;

    /// Attempts to create a new instance.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if validation fails.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>
    where
        Self: Sized;
}
