//! Settings-page flows: gate at the door, then draft, membership and
//! invite surfaces over the in-memory API.

use atrium_app::settings::{
    DeleteProjectDialog, DeleteProjectError, InviteDialog, MembershipPanel, SettingsScreen,
};
use atrium_auth::{GateOutcome, PermissionGate, PermissionResolver, DASHBOARD_ROUTE};
use atrium_client::testing::InMemoryApi;
use atrium_types::{Member, PermissionLevel, UseCase, UserId};
use std::sync::Arc;

fn member(id: &str, permission: PermissionLevel) -> Member {
    Member {
        id: UserId::new(id),
        name: id.to_string(),
        email: format!("{id}@example.com"),
        permission,
    }
}

#[tokio::test]
async fn viewer_is_redirected_off_the_settings_page() {
    let api = Arc::new(InMemoryApi::new());
    let project = api.seed_project("Atlas");
    api.set_permission(&project.id, PermissionLevel::Viewer);

    let resolver = PermissionResolver::new(api);
    let gate = PermissionGate::managers();
    assert_eq!(
        gate.check(Some(&project.id), &resolver).await,
        GateOutcome::Redirect(DASHBOARD_ROUTE)
    );
}

#[tokio::test]
async fn editor_edits_settings_but_cannot_delete() {
    let api = Arc::new(InMemoryApi::new());
    let project = api.seed_project("Atlas");
    api.set_permission(&project.id, PermissionLevel::Editor);

    let resolver = PermissionResolver::new(api.clone());
    assert!(PermissionGate::managers()
        .check(Some(&project.id), &resolver)
        .await
        .should_render());
    // Deletion is behind the stricter gate.
    assert_eq!(
        PermissionGate::owner_only()
            .check(Some(&project.id), &resolver)
            .await,
        GateOutcome::Redirect(DASHBOARD_ROUTE)
    );

    let mut screen = SettingsScreen::load(api, &project.id).await.unwrap();
    screen.set_use_case(UseCase::Licensing);
    screen.save().await.unwrap();
    assert_eq!(screen.project().use_case, Some(UseCase::Licensing));
}

#[tokio::test]
async fn owner_runs_the_full_membership_flow() {
    let api = Arc::new(InMemoryApi::new());
    let project = api.seed_project("Atlas");
    api.set_permission(&project.id, PermissionLevel::Owner);
    api.set_members(
        &project.id,
        vec![
            member("me", PermissionLevel::Owner),
            member("teammate", PermissionLevel::Viewer),
        ],
    );

    let mut panel = MembershipPanel::load(api.clone(), project.id.clone(), UserId::new("me"))
        .await
        .unwrap();
    assert_eq!(panel.caller_permission(), Some(PermissionLevel::Owner));

    // Promote, invite, then remove.
    panel
        .change_permission(&UserId::new("teammate"), PermissionLevel::Editor)
        .await
        .unwrap();

    let dialog = InviteDialog::new(api.clone(), project.id.clone(), panel.caller_permission());
    let notice = dialog
        .invite("new@example.com", PermissionLevel::Viewer)
        .await
        .unwrap();
    assert!(!notice.is_expired());
    assert_eq!(api.invites().len(), 1);

    panel.remove(&UserId::new("teammate"), true).await.unwrap();
    assert_eq!(panel.members().len(), 1);
}

#[tokio::test]
async fn delete_flow_requires_exact_confirmation() {
    let api = Arc::new(InMemoryApi::new());
    let project = api.seed_project("Atlas");
    api.set_permission(&project.id, PermissionLevel::Owner);

    let dialog = DeleteProjectDialog::open(&project);
    let code = dialog.code().to_string();

    let err = dialog
        .execute(api.as_ref(), "Atlas", "wrong-code", true)
        .await
        .unwrap_err();
    assert!(matches!(err, DeleteProjectError::Mismatch));
    assert!(api.deleted().is_empty());

    dialog
        .execute(api.as_ref(), "Atlas", &code, true)
        .await
        .unwrap();
    assert_eq!(api.deleted(), vec![project.id]);
}
