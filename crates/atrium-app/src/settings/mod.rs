//! Settings and membership management.
//!
//! The whole surface is gated behind Owner-or-Editor at page level
//! (`PermissionGate::managers()`); project deletion is additionally
//! Owner-only. The submodules mirror the dashboard's four surfaces:
//!
//! - [`SettingsScreen`] — editable-fields draft and save/reload
//! - [`DeleteProjectDialog`] — the two-factor deletion confirmation
//! - [`MembershipPanel`] — member list, role changes, removal
//! - [`InviteDialog`] — email invitations with role options

mod delete;
mod draft;
mod invite;
mod members;

pub use delete::{DeleteProjectDialog, DeleteProjectError, CONFIRMATION_CODE_LEN};
pub use draft::{SettingsError, SettingsScreen};
pub use invite::{InviteDialog, InviteError, InviteNotice, SUCCESS_NOTICE_TTL};
pub use members::{MembershipError, MembershipPanel};
