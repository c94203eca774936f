//! Permission resolution, gating and membership policy.
//!
//! Three pieces, layered bottom-up:
//!
//! - [`PermissionResolver`] — one authenticated read of the caller's
//!   permission for a project. Fails *closed*: any failure (missing
//!   token, non-success response, transport error) resolves to `None`,
//!   never to an error the caller must handle.
//! - [`PermissionGate`] — the reusable authorization check. Given a
//!   non-empty allow-list it decides whether a UI subtree renders,
//!   hides, or (strict variant) redirects to the dashboard.
//! - [`policy`] — the pure membership rules: who may edit or delete a
//!   member, and which roles a caller may invite.
//!
//! # Fail-closed default
//!
//! An unresolved permission and a denied permission look identical to
//! the rendered UI: the gated subtree is simply absent. The only
//! behavioral split is that the strict gate *redirects* on a resolved
//! disallowed permission, while an unresolved one leaves the user
//! where they are.
//!
//! # No caching
//!
//! Permissions are resolved fresh on every check. Staleness after a
//! permission change is not tolerated by the dashboard design, so no
//! caching layer may be introduced here.

mod gate;
pub mod policy;
mod resolver;

pub use gate::{EmptyAllowList, GateOutcome, PermissionGate};
pub use resolver::PermissionResolver;

/// Route the strict gate redirects to on a denied permission.
pub const DASHBOARD_ROUTE: &str = "/dashboard";
