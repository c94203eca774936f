//! Project membership.

use crate::{PermissionLevel, UserId};
use serde::{Deserialize, Serialize};

/// One member of a project, as returned by
/// `GET /projects/{id}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Identity-provider user id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role within this project.
    pub permission: PermissionLevel,
}

impl Member {
    /// Display label of this member's permission.
    #[must_use]
    pub fn permission_label(&self) -> &'static str {
        self.permission.label()
    }
}

/// Orders members for display: the current user first, then owners,
/// then everyone else. Relative order within each group is preserved.
///
/// # Example
///
/// ```
/// use atrium_types::{sort_members, Member, PermissionLevel, UserId};
///
/// let mut members = vec![
///     Member { id: UserId::new("a"), name: "A".into(), email: "a@x".into(),
///              permission: PermissionLevel::Viewer },
///     Member { id: UserId::new("b"), name: "B".into(), email: "b@x".into(),
///              permission: PermissionLevel::Owner },
///     Member { id: UserId::new("c"), name: "C".into(), email: "c@x".into(),
///              permission: PermissionLevel::Editor },
/// ];
/// sort_members(&mut members, &UserId::new("c"));
/// let ids: Vec<_> = members.iter().map(|m| m.id.as_str().to_string()).collect();
/// assert_eq!(ids, ["c", "b", "a"]);
/// ```
pub fn sort_members(members: &mut [Member], current_user: &UserId) {
    members.sort_by_key(|member| {
        if member.id == *current_user {
            0
        } else if member.permission.is_owner() {
            1
        } else {
            2
        }
    });
}
