//! Permission resolution against the external API.

use atrium_client::{ApiError, ProjectApi};
use atrium_types::{ErrorCode, PermissionLevel, ProjectId};
use std::sync::Arc;
use tracing::{error, warn};

/// Resolves the signed-in user's permission for one project.
///
/// Issues a single authenticated read of
/// `GET /projects/{id}/permissions` per call. There are no retries
/// and no caching: every consumer re-resolves on every check so a
/// permission change takes effect immediately.
///
/// # Failure semantics
///
/// `resolve` never surfaces an error. A missing token, a non-success
/// response and a transport failure all collapse to `None`, which
/// fails any allow-list check. The cause is logged for operators.
#[derive(Clone)]
pub struct PermissionResolver {
    api: Arc<dyn ProjectApi>,
}

impl PermissionResolver {
    /// Creates a resolver over the given API.
    #[must_use]
    pub fn new(api: Arc<dyn ProjectApi>) -> Self {
        Self { api }
    }

    /// Resolves the caller's permission for `project`, or `None` when
    /// it cannot be determined.
    pub async fn resolve(&self, project: &ProjectId) -> Option<PermissionLevel> {
        match self.api.permission(project).await {
            Ok(level) => Some(level),
            Err(ApiError::MissingToken) => {
                error!(%project, "no auth token; treating permission as unresolved");
                None
            }
            Err(err) => {
                warn!(
                    %project,
                    code = err.code(),
                    error = %err,
                    "failed to fetch permission; failing closed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_client::testing::InMemoryApi;

    #[tokio::test]
    async fn resolves_known_permission() {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        api.set_permission(&project.id, PermissionLevel::Editor);

        let resolver = PermissionResolver::new(api);
        assert_eq!(
            resolver.resolve(&project.id).await,
            Some(PermissionLevel::Editor)
        );
    }

    #[tokio::test]
    async fn missing_record_resolves_to_none() {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");

        let resolver = PermissionResolver::new(api);
        assert_eq!(resolver.resolve(&project.id).await, None);
    }

    #[tokio::test]
    async fn server_failure_resolves_to_none() {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        api.set_permission(&project.id, PermissionLevel::Owner);
        api.fail_all(true);

        let resolver = PermissionResolver::new(api);
        assert_eq!(resolver.resolve(&project.id).await, None);
    }
}
