//! Project listing, selection and creation.

use crate::{ProjectContext, SelectionStore};
use atrium_client::{ApiError, ProjectApi};
use atrium_types::{ErrorCode, NewProject, Project, ProjectId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Soft ceiling on selectable/creatable projects per account,
/// enforced client-side. This constant is the single source of truth:
/// the cap-reached notice is rendered from it.
pub const MAX_PROJECTS: usize = 150;

/// User-facing notice shown in the picker once the cap is reached.
#[must_use]
pub fn cap_notice() -> String {
    format!("Max {MAX_PROJECTS} project limit reached. Please delete one to create a new project.")
}

/// Result of initializing the selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorOutcome {
    /// A project was selected (restored or defaulted) and pushed into
    /// the context.
    Selected(Project),
    /// The account has no usable projects — either the list was empty
    /// or the fetch failed — so the creation modal opens
    /// unconditionally. The two causes are indistinguishable to the
    /// user by design; the failure case is additionally logged.
    OpenCreateModal,
}

/// Error from project creation.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The soft project cap is reached; creation is disabled.
    #[error("{}", cap_notice())]
    CapReached,

    /// The API rejected or failed the creation call.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ErrorCode for CreateError {
    fn code(&self) -> &'static str {
        match self {
            Self::CapReached => "APP_PROJECT_CAP",
            Self::Api(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Deleting a project frees a slot.
            Self::CapReached => true,
            Self::Api(e) => e.is_recoverable(),
        }
    }
}

/// Lists the user's projects, restores or defaults the active
/// selection, and creates new projects.
///
/// Selection changes are persisted through the [`SelectionStore`] and
/// mirrored into the [`ProjectContext`]; persistence failures are
/// logged and otherwise ignored (the in-memory selection still
/// applies for this run).
///
/// # Example
///
/// ```no_run
/// use atrium_app::{ProjectProvider, ProjectSelector, SelectionStore, SelectorOutcome};
/// use atrium_client::{ApiClient, StaticToken};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), atrium_app::StorageError> {
/// let api = Arc::new(ApiClient::new(
///     "https://api.example.com",
///     Arc::new(StaticToken::new("token")),
/// ));
/// let store = SelectionStore::new("/tmp/atrium-state".into())?;
/// let provider = ProjectProvider::new();
///
/// let mut selector = ProjectSelector::new(api, store, provider.handle());
/// match selector.initialize().await {
///     SelectorOutcome::Selected(p) => println!("active: {}", p.name),
///     SelectorOutcome::OpenCreateModal => println!("create your first project"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProjectSelector {
    api: Arc<dyn ProjectApi>,
    store: SelectionStore,
    context: ProjectContext,
    projects: Vec<Project>,
}

impl ProjectSelector {
    /// Creates an uninitialized selector.
    #[must_use]
    pub fn new(api: Arc<dyn ProjectApi>, store: SelectionStore, context: ProjectContext) -> Self {
        Self {
            api,
            store,
            context,
            projects: Vec::new(),
        }
    }

    /// Fetches the project list and establishes the active selection.
    ///
    /// A previously persisted selection is restored when it still
    /// exists in the fetched list; otherwise the *last* element of
    /// the list becomes active. An empty list and a failed fetch both
    /// open the creation modal.
    pub async fn initialize(&mut self) -> SelectorOutcome {
        let projects = match self.api.list_projects().await {
            Ok(projects) => projects,
            Err(err) => {
                // Indistinguishable from "no projects" for the user;
                // log so operators can tell the two states apart.
                warn!(code = err.code(), error = %err, "project list fetch failed");
                return SelectorOutcome::OpenCreateModal;
            }
        };
        if projects.is_empty() {
            debug!("account has no projects");
            return SelectorOutcome::OpenCreateModal;
        }
        self.projects = projects;

        let restored = match self.store.load().await {
            Ok(saved) => saved.and_then(|id| self.find(&id)),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable stored selection");
                None
            }
        };
        // Fall back to the most-recently-returned project.
        let chosen = match restored {
            Some(project) => project,
            None => self
                .projects
                .last()
                .cloned()
                .unwrap_or_else(|| unreachable!("list checked non-empty above")),
        };
        self.apply_selection(chosen.clone()).await;
        SelectorOutcome::Selected(chosen)
    }

    /// Selects a project from the fetched list by id.
    ///
    /// Returns `None` (and changes nothing) when the id is not in the
    /// list.
    pub async fn select(&mut self, id: &ProjectId) -> Option<Project> {
        let project = self.find(id)?;
        self.apply_selection(project.clone()).await;
        Some(project)
    }

    /// Creates a project, appends it to the list, auto-selects it and
    /// persists the selection.
    ///
    /// # Errors
    ///
    /// [`CreateError::CapReached`] when the soft cap is hit, or the
    /// underlying [`ApiError`].
    pub async fn create(&mut self, new: NewProject) -> Result<Project, CreateError> {
        if !self.can_create() {
            return Err(CreateError::CapReached);
        }
        let project = self.api.create_project(&new).await?;
        self.projects.push(project.clone());
        self.apply_selection(project.clone()).await;
        Ok(project)
    }

    /// Whether creation is still offered in the picker.
    #[must_use]
    pub fn can_create(&self) -> bool {
        self.projects.len() < MAX_PROJECTS
    }

    /// The fetched project list, in API order plus any local appends.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    fn find(&self, id: &ProjectId) -> Option<Project> {
        self.projects.iter().find(|p| p.id == *id).cloned()
    }

    async fn apply_selection(&self, project: Project) {
        if let Err(err) = self.store.save(&project.id).await {
            warn!(project = %project.id, error = %err, "failed to persist selection");
        }
        self.context.set_selected(project);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_notice_names_the_enforced_constant() {
        assert!(cap_notice().contains("150"));
    }

    #[test]
    fn create_error_codes() {
        assert_eq!(CreateError::CapReached.code(), "APP_PROJECT_CAP");
        assert!(CreateError::CapReached.is_recoverable());
    }
}
