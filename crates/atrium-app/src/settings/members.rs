//! Member list management.

use atrium_auth::policy;
use atrium_client::{ApiError, ProjectApi};
use atrium_types::{sort_members, ErrorCode, Member, PermissionLevel, ProjectId, UserId};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Error from member management.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The caller's role does not permit this change, or the change
    /// targets the caller's own entry. Checked client-side before any
    /// request.
    #[error("not permitted to modify this member")]
    NotPermitted,

    /// The user declined the removal confirmation. No request made.
    #[error("member removal cancelled")]
    Cancelled,

    /// The API refused or failed the call; the local list is
    /// unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ErrorCode for MembershipError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotPermitted => "APP_MEMBER_NOT_PERMITTED",
            Self::Cancelled => "APP_MEMBER_CANCELLED",
            Self::Api(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::NotPermitted => false,
            Self::Cancelled => true,
            Self::Api(e) => e.is_recoverable(),
        }
    }
}

/// The member management surface of the settings screen.
///
/// Holds the fetched member list (current user pinned first, then
/// owners, then the rest) and the caller's own permission, derived
/// from their entry in that list. Every mutation is policy-checked
/// client-side before the request and applied to the local list only
/// after the API accepts it.
pub struct MembershipPanel {
    api: Arc<dyn ProjectApi>,
    project: ProjectId,
    current_user: UserId,
    members: Vec<Member>,
    caller_permission: Option<PermissionLevel>,
}

impl MembershipPanel {
    /// Fetches and orders the member list.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the fetch fails.
    pub async fn load(
        api: Arc<dyn ProjectApi>,
        project: ProjectId,
        current_user: UserId,
    ) -> Result<Self, MembershipError> {
        let mut members = api.members(&project).await?;
        sort_members(&mut members, &current_user);
        let caller_permission = members
            .iter()
            .find(|m| m.id == current_user)
            .map(|m| m.permission);
        Ok(Self {
            api,
            project,
            current_user,
            members,
            caller_permission,
        })
    }

    /// The ordered member list.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The caller's permission, from their own entry in the list.
    #[must_use]
    pub fn caller_permission(&self) -> Option<PermissionLevel> {
        self.caller_permission
    }

    /// Whether the role dropdown is enabled for `target`.
    #[must_use]
    pub fn can_edit(&self, target: &Member) -> bool {
        policy::can_edit_member(
            self.caller_permission,
            &self.current_user,
            &target.id,
            target.permission,
        )
    }

    /// Whether the delete control shows for `target`.
    #[must_use]
    pub fn can_delete(&self, target: &Member) -> bool {
        policy::can_delete_member(self.caller_permission, &self.current_user, &target.id)
    }

    /// Changes a member's role to Editor or Viewer.
    ///
    /// Owner is never grantable through this surface; ownership
    /// transfer does not exist in the dashboard.
    ///
    /// # Errors
    ///
    /// [`MembershipError::NotPermitted`] on a policy violation
    /// (before any request), or the underlying [`ApiError`].
    pub async fn change_permission(
        &mut self,
        target: &UserId,
        level: PermissionLevel,
    ) -> Result<(), MembershipError> {
        if level == PermissionLevel::Owner {
            return Err(MembershipError::NotPermitted);
        }
        let current = self
            .members
            .iter()
            .find(|m| m.id == *target)
            .ok_or(MembershipError::NotPermitted)?
            .permission;
        if !policy::can_edit_member(self.caller_permission, &self.current_user, target, current) {
            return Err(MembershipError::NotPermitted);
        }

        self.api
            .set_member_permission(&self.project, target, level)
            .await?;
        if let Some(member) = self.members.iter_mut().find(|m| m.id == *target) {
            member.permission = level;
        }
        info!(project = %self.project, member = %target, level = %level, "member permission changed");
        Ok(())
    }

    /// Removes a member after a confirmation prompt.
    ///
    /// # Errors
    ///
    /// [`MembershipError::Cancelled`] when unconfirmed,
    /// [`MembershipError::NotPermitted`] on a policy violation, or
    /// the underlying [`ApiError`].
    pub async fn remove(
        &mut self,
        target: &UserId,
        confirmed: bool,
    ) -> Result<(), MembershipError> {
        if !confirmed {
            return Err(MembershipError::Cancelled);
        }
        if !policy::can_delete_member(self.caller_permission, &self.current_user, target) {
            return Err(MembershipError::NotPermitted);
        }

        self.api.remove_member(&self.project, target).await?;
        self.members.retain(|m| m.id != *target);
        info!(project = %self.project, member = %target, "member removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_client::testing::InMemoryApi;

    fn member(id: &str, permission: PermissionLevel) -> Member {
        Member {
            id: UserId::new(id),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            permission,
        }
    }

    async fn panel(caller: &str, members: Vec<Member>) -> (Arc<InMemoryApi>, MembershipPanel) {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        api.set_members(&project.id, members);
        let panel = MembershipPanel::load(api.clone(), project.id, UserId::new(caller))
            .await
            .unwrap();
        (api, panel)
    }

    #[tokio::test]
    async fn caller_is_pinned_first_and_permission_derived() {
        let (_api, panel) = panel(
            "me",
            vec![
                member("owner", PermissionLevel::Owner),
                member("me", PermissionLevel::Editor),
                member("viewer", PermissionLevel::Viewer),
            ],
        )
        .await;
        assert_eq!(panel.members()[0].id, UserId::new("me"));
        assert_eq!(panel.caller_permission(), Some(PermissionLevel::Editor));
    }

    #[tokio::test]
    async fn editor_may_change_viewers_only() {
        let (_api, mut panel) = panel(
            "me",
            vec![
                member("me", PermissionLevel::Editor),
                member("other-editor", PermissionLevel::Editor),
                member("viewer", PermissionLevel::Viewer),
            ],
        )
        .await;

        panel
            .change_permission(&UserId::new("viewer"), PermissionLevel::Editor)
            .await
            .unwrap();
        assert_eq!(
            panel.members().iter().find(|m| m.id == UserId::new("viewer")).map(|m| m.permission),
            Some(PermissionLevel::Editor)
        );

        let err = panel
            .change_permission(&UserId::new("other-editor"), PermissionLevel::Viewer)
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::NotPermitted));
    }

    #[tokio::test]
    async fn nobody_edits_or_removes_themselves() {
        let (api, mut panel) = panel(
            "me",
            vec![
                member("me", PermissionLevel::Owner),
                member("viewer", PermissionLevel::Viewer),
            ],
        )
        .await;

        let me = UserId::new("me");
        assert!(matches!(
            panel.change_permission(&me, PermissionLevel::Viewer).await,
            Err(MembershipError::NotPermitted)
        ));
        assert!(matches!(
            panel.remove(&me, true).await,
            Err(MembershipError::NotPermitted)
        ));
        // Nothing reached the API.
        assert_eq!(api.members(&panel.project).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn owner_is_never_grantable() {
        let (_api, mut panel) = panel(
            "me",
            vec![
                member("me", PermissionLevel::Owner),
                member("viewer", PermissionLevel::Viewer),
            ],
        )
        .await;
        assert!(matches!(
            panel
                .change_permission(&UserId::new("viewer"), PermissionLevel::Owner)
                .await,
            Err(MembershipError::NotPermitted)
        ));
    }

    #[tokio::test]
    async fn removal_requires_confirmation_and_ownership() {
        let (_api, mut panel) = panel(
            "me",
            vec![
                member("me", PermissionLevel::Owner),
                member("viewer", PermissionLevel::Viewer),
            ],
        )
        .await;
        let viewer = UserId::new("viewer");

        assert!(matches!(
            panel.remove(&viewer, false).await,
            Err(MembershipError::Cancelled)
        ));
        panel.remove(&viewer, true).await.unwrap();
        assert_eq!(panel.members().len(), 1);
    }

    #[tokio::test]
    async fn editor_cannot_remove_anyone() {
        let (_api, mut panel) = panel(
            "me",
            vec![
                member("me", PermissionLevel::Editor),
                member("viewer", PermissionLevel::Viewer),
            ],
        )
        .await;
        assert!(matches!(
            panel.remove(&UserId::new("viewer"), true).await,
            Err(MembershipError::NotPermitted)
        ));
    }
}
