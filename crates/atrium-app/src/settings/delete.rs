//! Project deletion with two-factor confirmation.

use atrium_client::{ApiError, ProjectApi};
use atrium_types::{ErrorCode, Project, ProjectId};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Length of the generated confirmation code.
pub const CONFIRMATION_CODE_LEN: usize = 10;

/// Error from the delete flow.
#[derive(Debug, Error)]
pub enum DeleteProjectError {
    /// Typed name or code did not match. Checked client-side; no
    /// request was made.
    #[error("Please ensure the project name and the confirmation code match.")]
    Mismatch,

    /// The user declined the final blocking confirmation. No request
    /// was made.
    #[error("deletion cancelled")]
    Cancelled,

    /// The API refused or failed the deletion; the project is intact.
    /// The user sees a generic message, the source carries detail for
    /// logs.
    #[error("Failed to delete the project.")]
    Api(#[source] ApiError),
}

impl ErrorCode for DeleteProjectError {
    fn code(&self) -> &'static str {
        match self {
            Self::Mismatch => "APP_DELETE_MISMATCH",
            Self::Cancelled => "APP_DELETE_CANCELLED",
            Self::Api(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Retype and retry.
            Self::Mismatch | Self::Cancelled => true,
            Self::Api(e) => e.is_recoverable(),
        }
    }
}

/// Generates a fresh alphanumeric confirmation code.
fn generate_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CONFIRMATION_CODE_LEN)
        .map(char::from)
        .collect()
}

/// The deletion confirmation dialog (Owner-only; gate at the call
/// site with `PermissionGate::owner_only()`).
///
/// A random code is generated when the dialog opens. Deletion
/// requires the user to retype the exact project name AND the exact
/// code, plus answer a blocking confirmation prompt. Any mismatch
/// blocks the request client-side before a byte hits the network.
///
/// # Example
///
/// ```no_run
/// # use atrium_app::settings::DeleteProjectDialog;
/// # use std::sync::Arc;
/// # async fn example(api: Arc<dyn atrium_client::ProjectApi>, project: atrium_types::Project) {
/// let dialog = DeleteProjectDialog::open(&project);
/// println!("type the project name and this code: {}", dialog.code());
/// // ... collect user input ...
/// # let (name, code, confirmed) = (String::new(), String::new(), true);
/// match dialog.execute(api.as_ref(), &name, &code, confirmed).await {
///     Ok(()) => println!("deleted"),
///     Err(err) => eprintln!("{err}"),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeleteProjectDialog {
    project_id: ProjectId,
    project_name: String,
    code: String,
}

impl DeleteProjectDialog {
    /// Opens the dialog for a project, generating a fresh code.
    #[must_use]
    pub fn open(project: &Project) -> Self {
        Self::with_code(project, generate_code())
    }

    fn with_code(project: &Project, code: String) -> Self {
        Self {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            code,
        }
    }

    /// The code the user must retype, for display in the dialog.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Attempts the deletion.
    ///
    /// Validation order matches the dialog: exact-match check first
    /// (no network on mismatch), then the blocking confirmation, then
    /// the DELETE request.
    ///
    /// # Errors
    ///
    /// [`DeleteProjectError::Mismatch`], [`DeleteProjectError::Cancelled`],
    /// or [`DeleteProjectError::Api`]; the project is intact in every
    /// error case.
    pub async fn execute(
        &self,
        api: &dyn ProjectApi,
        typed_name: &str,
        typed_code: &str,
        confirmed: bool,
    ) -> Result<(), DeleteProjectError> {
        if typed_name != self.project_name || typed_code != self.code {
            return Err(DeleteProjectError::Mismatch);
        }
        if !confirmed {
            return Err(DeleteProjectError::Cancelled);
        }
        api.delete_project(&self.project_id)
            .await
            .map_err(DeleteProjectError::Api)?;
        info!(project = %self.project_id, "project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_client::testing::InMemoryApi;

    fn dialog_with(project: &Project, code: &str) -> DeleteProjectDialog {
        DeleteProjectDialog::with_code(project, code.to_string())
    }

    #[test]
    fn generated_code_shape() {
        let code = generate_code();
        assert_eq!(code.len(), CONFIRMATION_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        // Codes are per-open; two opens should essentially never
        // collide.
        assert_ne!(generate_code(), code);
    }

    #[tokio::test]
    async fn exact_match_fires_the_request() {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        let dialog = dialog_with(&project, "aZ3kP9qLmN");

        dialog
            .execute(api.as_ref(), "Atlas", "aZ3kP9qLmN", true)
            .await
            .unwrap();
        assert_eq!(api.deleted(), vec![project.id]);
    }

    #[tokio::test]
    async fn single_character_mismatch_never_fires() {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        let dialog = dialog_with(&project, "aZ3kP9qLmN");

        for (name, code) in [
            ("Atlas", "aZ3kP9qLmn"), // last char wrong
            ("Atlaz", "aZ3kP9qLmN"), // name wrong
            ("atlas", "aZ3kP9qLmN"), // case matters
            ("", ""),
        ] {
            let err = dialog
                .execute(api.as_ref(), name, code, true)
                .await
                .unwrap_err();
            assert!(matches!(err, DeleteProjectError::Mismatch));
        }
        assert!(api.deleted().is_empty());
    }

    #[tokio::test]
    async fn declined_confirmation_blocks_before_network() {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        let dialog = dialog_with(&project, "aZ3kP9qLmN");

        let err = dialog
            .execute(api.as_ref(), "Atlas", "aZ3kP9qLmN", false)
            .await
            .unwrap_err();
        assert!(matches!(err, DeleteProjectError::Cancelled));
        assert!(api.deleted().is_empty());
    }

    #[tokio::test]
    async fn api_failure_leaves_project_intact() {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        let dialog = dialog_with(&project, "aZ3kP9qLmN");
        api.fail_all(true);

        let err = dialog
            .execute(api.as_ref(), "Atlas", "aZ3kP9qLmN", true)
            .await
            .unwrap_err();
        assert!(matches!(err, DeleteProjectError::Api(_)));
        assert_eq!(err.to_string(), "Failed to delete the project.");

        api.fail_all(false);
        assert!(api.project_detail(&project.id).await.is_ok());
    }
}
