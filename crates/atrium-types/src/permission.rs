//! Permission levels scoped per (user, project).
//!
//! The external API transmits permissions as bare integers. This
//! module closes that set into an enum so every consumer — gate,
//! policy, label mapping — is exhaustiveness-checked by the compiler.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Role of a user within one project.
///
/// # Wire Format
///
/// Serialized as the integer the API uses: `0`, `1` or `2`. Any other
/// integer fails deserialization with [`InvalidPermission`]; there is
/// deliberately no `Unknown` variant.
///
/// # Ordering
///
/// Derived ordering follows the integer encoding, so `Owner < Editor
/// < Viewer`: a *smaller* value means *more* authority. Prefer the
/// named predicates over comparison operators in policy code.
///
/// # Example
///
/// ```
/// use atrium_types::PermissionLevel;
///
/// let level: PermissionLevel = serde_json::from_str("1").unwrap();
/// assert_eq!(level, PermissionLevel::Editor);
/// assert_eq!(level.label(), "Can Edit");
/// assert!(level.can_manage());
/// assert!(!level.is_owner());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PermissionLevel {
    /// Full control: delete the project, manage every member.
    Owner = 0,
    /// May invite and manage viewers; may not delete the project or
    /// manage owners/editors.
    Editor = 1,
    /// Read-only access.
    Viewer = 2,
}

impl PermissionLevel {
    /// All levels, in wire order.
    pub const ALL: [Self; 3] = [Self::Owner, Self::Editor, Self::Viewer];

    /// Display label shown in member lists and invite menus.
    ///
    /// Total over the closed set; adding a variant is a compile error
    /// here first.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Editor => "Can Edit",
            Self::Viewer => "Can View",
        }
    }

    /// Whether this level is [`Owner`](Self::Owner).
    #[must_use]
    pub fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Whether this level can manage the project (settings, invites):
    /// owners and editors.
    #[must_use]
    pub fn can_manage(self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<PermissionLevel> for u8 {
    fn from(level: PermissionLevel) -> Self {
        level as u8
    }
}

/// Error for an integer outside the closed permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid permission level {0}: expected 0 (Owner), 1 (Editor) or 2 (Viewer)")]
pub struct InvalidPermission(pub u8);

impl TryFrom<u8> for PermissionLevel {
    type Error = InvalidPermission;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Owner),
            1 => Ok(Self::Editor),
            2 => Ok(Self::Viewer),
            other => Err(InvalidPermission(other)),
        }
    }
}
