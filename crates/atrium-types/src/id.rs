//! Identifier types for Atrium.
//!
//! Identifiers are opaque strings issued by external systems: project
//! ids by the REST API, user ids by the identity provider. They are
//! newtypes rather than raw `String`s so a project id can never be
//! passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a project, issued by the external API at creation.
///
/// # Example
///
/// ```
/// use atrium_types::ProjectId;
///
/// let id = ProjectId::new("proj_42");
/// assert_eq!(id.as_str(), "proj_42");
/// assert_eq!(id.to_string(), "proj_42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a project id from its wire representation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a user, issued by the external identity provider.
///
/// Users are compared by id only; display name and email are
/// presentation data carried on [`Member`](crate::Member).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id from its wire representation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_round_trips_through_json() {
        let id = ProjectId::new("proj_1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"proj_1\"");
        let back: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn user_id_equality_is_by_value() {
        assert_eq!(UserId::new("u1"), UserId::from("u1"));
        assert_ne!(UserId::new("u1"), UserId::new("u2"));
    }
}
