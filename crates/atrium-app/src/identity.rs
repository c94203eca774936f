//! The signed-in user.

use crate::config::AppConfig;
use atrium_client::{ApiError, ProjectApi};
use atrium_types::UserId;
use tracing::debug;

/// The signed-in user's identity.
///
/// Built from configuration once sign-in completes; every surface
/// that needs "who am I" (member sorting, self-edit denial) reads it
/// from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user id.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl Identity {
    /// Builds the identity from configuration, or `None` while any
    /// field is missing (sign-in not finished).
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        Some(Self {
            user_id: UserId::new(config.user.id.clone()?),
            name: config.user.name.clone()?,
            email: config.user.email.clone()?,
        })
    }

    /// Registers this user with the backend.
    ///
    /// Runs once after sign-in. An already-registered user is not an
    /// error; the client treats the backend's conflict answer as
    /// success, so this is safe to call on every session start.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] on any other failure.
    pub async fn ensure_registered(&self, api: &dyn ProjectApi) -> Result<(), ApiError> {
        api.upsert_user().await?;
        debug!(user = %self.user_id, "user registration ensured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_client::testing::InMemoryApi;

    fn full_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.user.id = Some("u1".into());
        config.user.name = Some("Ada".into());
        config.user.email = Some("ada@example.com".into());
        config
    }

    #[test]
    fn identity_requires_every_field() {
        assert!(Identity::from_config(&AppConfig::default()).is_none());

        let mut partial = full_config();
        partial.user.email = None;
        assert!(Identity::from_config(&partial).is_none());

        let identity = Identity::from_config(&full_config()).unwrap();
        assert_eq!(identity.user_id, UserId::new("u1"));
        assert_eq!(identity.name, "Ada");
    }

    #[tokio::test]
    async fn registration_is_idempotent() {
        let api = InMemoryApi::new();
        let identity = Identity::from_config(&full_config()).unwrap();
        identity.ensure_registered(&api).await.unwrap();
        identity.ensure_registered(&api).await.unwrap();
        assert_eq!(api.user_upserts(), 2);
    }
}
