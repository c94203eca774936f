//! Authenticated REST client for the Atrium dashboard API.
//!
//! Every dashboard operation is a bearer-token-authorized HTTPS call
//! with JSON bodies. This crate owns the transport layer: request
//! construction, auth headers, status classification and body
//! decoding. Application logic (what to do with a project list, when
//! to resolve a permission) lives above in `atrium-auth` and
//! `atrium-app`.
//!
//! # Design
//!
//! - [`ProjectApi`] is the seam: one trait covering the eleven
//!   endpoints of the external API. Flows depend on
//!   `Arc<dyn ProjectApi>` so tests run against
//!   [`testing::InMemoryApi`] instead of the network.
//! - [`ApiClient`] is the real implementation over `reqwest`.
//! - [`TokenProvider`] abstracts the external identity provider: it
//!   either produces an opaque bearer token or it doesn't. A missing
//!   token aborts the operation with [`ApiError::MissingToken`]
//!   before any request is built.
//!
//! # Error taxonomy
//!
//! Matching the dashboard's error-handling design:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`ApiError::MissingToken`] | No token from the identity provider |
//! | [`ApiError::Status`] | Non-success HTTP response |
//! | [`ApiError::Transport`] | Network/TLS failure, request never completed |
//! | [`ApiError::Decode`] | Response body was not the expected JSON |
//!
//! No operation is retried and no request timeout is set; a hung
//! request hangs only the flow awaiting it, and dropping that future
//! cancels the request.

mod api;
mod error;
pub mod testing;
mod token;

pub use api::{ApiClient, ProjectApi};
pub use error::ApiError;
pub use token::{StaticToken, TokenProvider};
