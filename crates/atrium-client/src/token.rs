//! Bearer-token source abstraction.
//!
//! The identity provider is an external collaborator: it signs users
//! in and issues opaque bearer tokens. [`TokenProvider`] is the only
//! surface this workspace sees of it.

use async_trait::async_trait;

/// Source of bearer tokens for API calls.
///
/// Implementations must be thread-safe (`Send + Sync`) so one
/// provider can back every concurrent flow.
///
/// Returning `None` means "not signed in / token expired"; callers
/// abort the operation without issuing a request.
///
/// # Example
///
/// ```
/// use atrium_client::{StaticToken, TokenProvider};
///
/// # async fn example() {
/// let tokens = StaticToken::new("eyJ...");
/// assert_eq!(tokens.bearer_token().await.as_deref(), Some("eyJ..."));
/// # }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a currently valid bearer token, or `None` when no
    /// signed-in session exists.
    async fn bearer_token(&self) -> Option<String>;
}

/// Fixed-token provider for the CLI and for tests.
///
/// Real deployments would refresh tokens against the identity
/// provider; the CLI takes one from config or environment instead.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    /// Provider that always yields the given token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Provider that yields no token (signed-out state).
    #[must_use]
    pub fn signed_out() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}
