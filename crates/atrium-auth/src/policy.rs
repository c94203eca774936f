//! Membership policy rules.
//!
//! Pure functions over the closed permission set; no I/O. The
//! invariants, verbatim from the dashboard design:
//!
//! - A member can never edit or delete their own entry.
//! - An Owner may change or delete any other member.
//! - An Editor may only change members who are currently Viewers.
//! - Deletion is Owner-only.
//! - An Owner invites as Editor or Viewer; an Editor invites only as
//!   Viewer; a Viewer cannot invite.
//!
//! The caller's permission arrives as `Option<PermissionLevel>`
//! because it comes from the fail-closed resolver: `None` denies
//! everything.

use atrium_types::{PermissionLevel, UserId};

/// Whether `caller` may change `target`'s permission.
///
/// # Example
///
/// ```
/// use atrium_auth::policy::can_edit_member;
/// use atrium_types::{PermissionLevel, UserId};
///
/// let owner = UserId::new("owner");
/// let viewer = UserId::new("viewer");
/// assert!(can_edit_member(
///     Some(PermissionLevel::Owner), &owner, &viewer, PermissionLevel::Viewer,
/// ));
/// // Never against yourself, regardless of role.
/// assert!(!can_edit_member(
///     Some(PermissionLevel::Owner), &owner, &owner, PermissionLevel::Owner,
/// ));
/// ```
#[must_use]
pub fn can_edit_member(
    caller: Option<PermissionLevel>,
    caller_id: &UserId,
    target_id: &UserId,
    target: PermissionLevel,
) -> bool {
    if target_id == caller_id {
        return false;
    }
    match caller {
        Some(PermissionLevel::Owner) => true,
        Some(PermissionLevel::Editor) => target == PermissionLevel::Viewer,
        Some(PermissionLevel::Viewer) | None => false,
    }
}

/// Whether `caller` may remove `target` from the project.
///
/// Owner-only, and never against the caller's own entry.
#[must_use]
pub fn can_delete_member(
    caller: Option<PermissionLevel>,
    caller_id: &UserId,
    target_id: &UserId,
) -> bool {
    caller == Some(PermissionLevel::Owner) && target_id != caller_id
}

/// The roles `caller` may grant through an invite, in menu order.
///
/// Empty when the caller may not invite at all.
#[must_use]
pub fn invite_options(caller: Option<PermissionLevel>) -> &'static [PermissionLevel] {
    match caller {
        Some(PermissionLevel::Owner) => &[PermissionLevel::Editor, PermissionLevel::Viewer],
        Some(PermissionLevel::Editor) => &[PermissionLevel::Viewer],
        Some(PermissionLevel::Viewer) | None => &[],
    }
}

/// Whether `caller` may open the invite dialog at all.
#[must_use]
pub fn can_invite(caller: Option<PermissionLevel>) -> bool {
    !invite_options(caller).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s)
    }

    #[test]
    fn edit_truth_table() {
        // canEditMember is true iff (caller is Owner) or (caller is
        // Editor AND target is Viewer), and always false on self.
        let me = uid("me");
        let other = uid("other");
        for caller in PermissionLevel::ALL {
            for target in PermissionLevel::ALL {
                let expected = match caller {
                    PermissionLevel::Owner => true,
                    PermissionLevel::Editor => target == PermissionLevel::Viewer,
                    PermissionLevel::Viewer => false,
                };
                assert_eq!(
                    can_edit_member(Some(caller), &me, &other, target),
                    expected,
                    "caller={caller:?} target={target:?}"
                );
                // Self-edit is always denied.
                assert!(!can_edit_member(Some(caller), &me, &me, target));
            }
        }
    }

    #[test]
    fn unresolved_caller_edits_nothing() {
        assert!(!can_edit_member(
            None,
            &uid("me"),
            &uid("other"),
            PermissionLevel::Viewer
        ));
    }

    #[test]
    fn delete_truth_table() {
        let me = uid("me");
        let other = uid("other");
        for caller in PermissionLevel::ALL {
            let expected = caller == PermissionLevel::Owner;
            assert_eq!(can_delete_member(Some(caller), &me, &other), expected);
            // Never against the caller's own entry.
            assert!(!can_delete_member(Some(caller), &me, &me));
        }
        assert!(!can_delete_member(None, &me, &other));
    }

    #[test]
    fn editor_invites_viewer_only() {
        // Scenario: caller permission = 1 inviting → only "Can View"
        // is offered, never "Can Edit".
        assert_eq!(
            invite_options(Some(PermissionLevel::Editor)),
            &[PermissionLevel::Viewer]
        );
    }

    #[test]
    fn owner_invites_editor_or_viewer() {
        assert_eq!(
            invite_options(Some(PermissionLevel::Owner)),
            &[PermissionLevel::Editor, PermissionLevel::Viewer]
        );
    }

    #[test]
    fn viewer_and_unresolved_cannot_invite() {
        assert!(invite_options(Some(PermissionLevel::Viewer)).is_empty());
        assert!(invite_options(None).is_empty());
        assert!(!can_invite(Some(PermissionLevel::Viewer)));
        assert!(can_invite(Some(PermissionLevel::Editor)));
    }
}
