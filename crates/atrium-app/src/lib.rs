//! Atrium application layer.
//!
//! This crate assembles the dashboard's flows out of the lower
//! layers: project selection and its persistence, the navigation
//! shell, settings and membership management, identity bootstrap,
//! and layered configuration.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  atrium-types (ids, permissions, project model)             │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Access Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  atrium-client (ProjectApi, HTTP), atrium-auth (gate,       │
//! │  resolver, policy)                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Application Layer  ◄── HERE                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  atrium-app (selector, navigation, settings, config)        │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  atrium-cli (uses AppError → anyhow/eprintln)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Error Handling Strategy
//!
//! ```text
//! Internal Errors (ApiError, ConfigError, StorageError, ...)
//!                    ↓ From impl
//!               AppError (this crate)
//!                    ↓ anyhow::Error / eprintln
//!               CLI output
//! ```

pub mod config;
mod context;
mod error;
mod identity;
mod navigation;
pub mod selection;
mod selector;
pub mod settings;

pub use config::{AppConfig, ConfigError, ConfigLoader};
pub use context::{ProjectContext, ProjectProvider};
pub use error::AppError;
pub use identity::Identity;
pub use navigation::{active_tab, tabs_for, NavigationShell, Tab};
pub use selection::{SelectionStore, StorageError, SELECTION_KEY};
pub use selector::{cap_notice, CreateError, ProjectSelector, SelectorOutcome, MAX_PROJECTS};

// Re-export the access layer so the frontend depends on one crate.
pub use atrium_auth::{GateOutcome, PermissionGate, PermissionResolver, DASHBOARD_ROUTE};
pub use atrium_client::{ApiClient, ApiError, ProjectApi, StaticToken, TokenProvider};
pub use atrium_types::{
    ErrorCode, Industry, Member, ModelType, NewProject, PermissionLevel, Project,
    ProjectDescription, ProjectFieldError, ProjectFunction, ProjectId, ProjectName, TryNew,
    UseCase, UserId,
};
