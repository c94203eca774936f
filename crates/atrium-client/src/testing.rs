//! In-memory [`ProjectApi`] for tests.
//!
//! Backs the flow tests in `atrium-auth` and `atrium-app` without a
//! network. State lives behind a mutex so the fake can be shared as
//! `Arc<InMemoryApi>` across concurrent flows exactly like the real
//! client.

use crate::{ApiError, ProjectApi};
use async_trait::async_trait;
use atrium_types::{Member, NewProject, PermissionLevel, Project, ProjectId, ProjectPatch, UserId};
use parking_lot::Mutex;
use std::collections::HashMap;

/// A recorded invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvite {
    /// Target project.
    pub project: ProjectId,
    /// Invited email.
    pub email: String,
    /// Granted permission.
    pub permission: PermissionLevel,
}

#[derive(Default)]
struct State {
    projects: Vec<Project>,
    permissions: HashMap<ProjectId, PermissionLevel>,
    members: HashMap<ProjectId, Vec<Member>>,
    invites: Vec<RecordedInvite>,
    deleted: Vec<ProjectId>,
    next_id: u32,
    fail_all: bool,
    user_upserts: u32,
}

/// In-memory fake of the external API.
///
/// # Example
///
/// ```
/// use atrium_client::testing::InMemoryApi;
/// use atrium_client::ProjectApi;
/// use atrium_types::PermissionLevel;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let api = InMemoryApi::new();
/// let p = api.seed_project("Atlas");
/// api.set_permission(&p.id, PermissionLevel::Owner);
/// assert_eq!(api.permission(&p.id).await.unwrap(), PermissionLevel::Owner);
/// # }
/// ```
#[derive(Default)]
pub struct InMemoryApi {
    state: Mutex<State>,
}

impl InMemoryApi {
    /// Empty fake with no projects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a minimal project and returns it.
    pub fn seed_project(&self, name: &str) -> Project {
        let mut state = self.state.lock();
        state.next_id += 1;
        let project = Project {
            id: ProjectId::new(format!("p{}", state.next_id)),
            name: name.to_string(),
            description: None,
            industry: None,
            use_case: None,
            model_type: None,
            function: None,
        };
        state.projects.push(project.clone());
        project
    }

    /// Adds a full project record.
    pub fn seed_full_project(&self, project: Project) {
        self.state.lock().projects.push(project);
    }

    /// Sets the caller's permission for a project.
    pub fn set_permission(&self, id: &ProjectId, level: PermissionLevel) {
        self.state.lock().permissions.insert(id.clone(), level);
    }

    /// Clears the caller's permission for a project (resolver sees a
    /// 404).
    pub fn clear_permission(&self, id: &ProjectId) {
        self.state.lock().permissions.remove(id);
    }

    /// Replaces the member list of a project.
    pub fn set_members(&self, id: &ProjectId, members: Vec<Member>) {
        self.state.lock().members.insert(id.clone(), members);
    }

    /// Makes every operation fail with a 500 until cleared.
    pub fn fail_all(&self, fail: bool) {
        self.state.lock().fail_all = fail;
    }

    /// Invites recorded so far.
    #[must_use]
    pub fn invites(&self) -> Vec<RecordedInvite> {
        self.state.lock().invites.clone()
    }

    /// Projects deleted so far.
    #[must_use]
    pub fn deleted(&self) -> Vec<ProjectId> {
        self.state.lock().deleted.clone()
    }

    /// Number of `POST /users/` calls observed.
    #[must_use]
    pub fn user_upserts(&self) -> u32 {
        self.state.lock().user_upserts
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        if self.state.lock().fail_all {
            return Err(ApiError::status(500, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectApi for InMemoryApi {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.check_failure()?;
        Ok(self.state.lock().projects.clone())
    }

    async fn create_project(&self, new: &NewProject) -> Result<Project, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock();
        state.next_id += 1;
        let project = Project {
            id: ProjectId::new(format!("p{}", state.next_id)),
            name: new.name.as_str().to_string(),
            description: Some(new.description.as_str().to_string()),
            industry: Some(new.industry),
            use_case: Some(new.use_case),
            model_type: Some(new.model_type),
            function: Some(new.function),
        };
        state.projects.push(project.clone());
        // The creator becomes the owner.
        state
            .permissions
            .insert(project.id.clone(), PermissionLevel::Owner);
        Ok(project)
    }

    async fn project_detail(&self, id: &ProjectId) -> Result<Project, ApiError> {
        self.check_failure()?;
        self.state
            .lock()
            .projects
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or_else(|| ApiError::status(404, "project not found"))
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
    ) -> Result<Project, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| ApiError::status(404, "project not found"))?;
        if let Some(description) = &patch.description {
            project.description = Some(description.clone());
        }
        if let Some(industry) = patch.industry {
            project.industry = Some(industry);
        }
        if let Some(use_case) = patch.use_case {
            project.use_case = Some(use_case);
        }
        if let Some(model_type) = patch.model_type {
            project.model_type = Some(model_type);
        }
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock();
        let before = state.projects.len();
        state.projects.retain(|p| p.id != *id);
        if state.projects.len() == before {
            return Err(ApiError::status(404, "project not found"));
        }
        state.deleted.push(id.clone());
        Ok(())
    }

    async fn permission(&self, id: &ProjectId) -> Result<PermissionLevel, ApiError> {
        self.check_failure()?;
        self.state
            .lock()
            .permissions
            .get(id)
            .copied()
            .ok_or_else(|| ApiError::status(404, "no permission record"))
    }

    async fn members(&self, id: &ProjectId) -> Result<Vec<Member>, ApiError> {
        self.check_failure()?;
        Ok(self
            .state
            .lock()
            .members
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_member_permission(
        &self,
        id: &ProjectId,
        member: &UserId,
        level: PermissionLevel,
    ) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock();
        let members = state
            .members
            .get_mut(id)
            .ok_or_else(|| ApiError::status(404, "project not found"))?;
        let entry = members
            .iter_mut()
            .find(|m| m.id == *member)
            .ok_or_else(|| ApiError::status(404, "member not found"))?;
        entry.permission = level;
        Ok(())
    }

    async fn remove_member(&self, id: &ProjectId, member: &UserId) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock();
        let members = state
            .members
            .get_mut(id)
            .ok_or_else(|| ApiError::status(404, "project not found"))?;
        let before = members.len();
        members.retain(|m| m.id != *member);
        if members.len() == before {
            return Err(ApiError::status(404, "member not found"));
        }
        Ok(())
    }

    async fn invite(
        &self,
        id: &ProjectId,
        email: &str,
        level: PermissionLevel,
    ) -> Result<(), ApiError> {
        self.check_failure()?;
        self.state.lock().invites.push(RecordedInvite {
            project: id.clone(),
            email: email.to_string(),
            permission: level,
        });
        Ok(())
    }

    async fn upsert_user(&self) -> Result<(), ApiError> {
        self.check_failure()?;
        self.state.lock().user_upserts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_project_round_trips() {
        let api = InMemoryApi::new();
        let p = api.seed_project("Atlas");
        assert_eq!(api.list_projects().await.unwrap(), vec![p.clone()]);
        assert_eq!(api.project_detail(&p.id).await.unwrap().name, "Atlas");
    }

    #[tokio::test]
    async fn fail_all_poisons_every_operation() {
        let api = InMemoryApi::new();
        api.fail_all(true);
        assert!(api.list_projects().await.is_err());
        assert!(api.upsert_user().await.is_err());
        api.fail_all(false);
        assert!(api.list_projects().await.is_ok());
    }
}
