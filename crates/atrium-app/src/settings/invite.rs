//! Email invitations.

use atrium_auth::policy;
use atrium_client::{ApiError, ProjectApi};
use atrium_types::{ErrorCode, PermissionLevel, ProjectId};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

/// How long the success notice stays on screen.
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(10);

/// Error from the invite flow.
#[derive(Debug, Error)]
pub enum InviteError {
    /// The caller's role does not offer the requested level, or does
    /// not permit inviting at all. Checked client-side.
    #[error("not permitted to invite at this level")]
    NotPermitted,

    /// No email was entered. The send control requires one.
    #[error("an email address is required")]
    EmptyEmail,

    /// The API refused or failed the invite. The message shown to the
    /// user comes from the server when it sent one.
    #[error("{}", .0.user_message())]
    Api(#[source] ApiError),
}

impl ErrorCode for InviteError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotPermitted => "APP_INVITE_NOT_PERMITTED",
            Self::EmptyEmail => "APP_INVITE_EMPTY_EMAIL",
            Self::Api(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::NotPermitted => false,
            Self::EmptyEmail => true,
            Self::Api(e) => e.is_recoverable(),
        }
    }
}

/// The transient success notice shown after an invite goes out.
///
/// Dismisses itself after [`SUCCESS_NOTICE_TTL`].
#[derive(Debug, Clone)]
pub struct InviteNotice {
    message: &'static str,
    expires_at: Instant,
}

impl InviteNotice {
    fn new() -> Self {
        Self {
            message: "User invited and email sent successfully!",
            expires_at: Instant::now() + SUCCESS_NOTICE_TTL,
        }
    }

    /// The text to display.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Whether the notice should no longer be shown.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// The invite dialog for one project.
///
/// Role options come from the caller's own permission: an Owner may
/// grant Editor or Viewer, an Editor only Viewer, a Viewer nothing.
/// The dialog enforces the same rule again at send time, so a stale
/// menu cannot grant more than the caller holds.
pub struct InviteDialog {
    api: Arc<dyn ProjectApi>,
    project: ProjectId,
    caller: Option<PermissionLevel>,
}

impl InviteDialog {
    /// Opens the dialog with the caller's resolved permission.
    #[must_use]
    pub fn new(api: Arc<dyn ProjectApi>, project: ProjectId, caller: Option<PermissionLevel>) -> Self {
        Self {
            api,
            project,
            caller,
        }
    }

    /// The roles this caller may grant, in menu order.
    #[must_use]
    pub fn options(&self) -> &'static [PermissionLevel] {
        policy::invite_options(self.caller)
    }

    /// Sends the invite and returns the success notice.
    ///
    /// # Errors
    ///
    /// [`InviteError::EmptyEmail`] on a blank address,
    /// [`InviteError::NotPermitted`] when `level` is outside the
    /// caller's options (no request made), or [`InviteError::Api`]
    /// carrying the server's message when it sent one.
    pub async fn invite(
        &self,
        email: &str,
        level: PermissionLevel,
    ) -> Result<InviteNotice, InviteError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(InviteError::EmptyEmail);
        }
        if !self.options().contains(&level) {
            return Err(InviteError::NotPermitted);
        }

        self.api
            .invite(&self.project, email, level)
            .await
            .map_err(InviteError::Api)?;
        info!(project = %self.project, level = %level, "member invited");
        Ok(InviteNotice::new())
    }
}
