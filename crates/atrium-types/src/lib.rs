//! Core types for the Atrium project dashboard.
//!
//! This crate provides the foundational data model shared by every
//! Atrium layer: identifiers, the project/member model, permission
//! levels, and the validation traits used at construction time.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Foundation Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  atrium-types   : IDs, Project, Member, PermissionLevel ◄── │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Service Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  atrium-client  : REST client over the external API         │
//! │  atrium-auth    : permission resolver, gate, policy         │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Application / Frontend Layer                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  atrium-app     : context, selector, navigation, settings   │
//! │  atrium-cli     : command-line frontend                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Permission Model
//!
//! Permissions are a closed integer set scoped per (user, project):
//!
//! - `0` — Owner: full control, may delete the project and manage
//!   every member
//! - `1` — Editor: may invite and manage viewers; may not delete the
//!   project or manage owners/editors
//! - `2` — Viewer: read-only
//!
//! The set is closed by construction: [`PermissionLevel`] is an enum,
//! so label mapping and policy checks are exhaustiveness-checked by
//! the compiler.
//!
//! # Validation
//!
//! Field constraints from the external API (name ≤ 25 chars,
//! description ≤ 100 chars, non-blank) are enforced at construction
//! through the [`TryNew`] trait rather than re-checked at call sites.
//!
//! # Example
//!
//! ```
//! use atrium_types::{PermissionLevel, ProjectName, TryNew};
//!
//! let name = ProjectName::try_new("Research Hub".to_string()).unwrap();
//! assert_eq!(name.as_str(), "Research Hub");
//!
//! let owner = PermissionLevel::Owner;
//! assert_eq!(owner.label(), "Owner");
//! assert_eq!(u8::from(owner), 0);
//! ```

mod construct;
mod error;
mod id;
mod member;
mod permission;
mod project;

pub use construct::TryNew;
pub use error::ErrorCode;
pub use id::{ProjectId, UserId};
pub use member::{sort_members, Member};
pub use permission::{InvalidPermission, PermissionLevel};
pub use project::{
    Industry, ModelType, NewProject, Project, ProjectDescription, ProjectFieldError,
    ProjectFunction, ProjectName, ProjectPatch, UseCase,
};
