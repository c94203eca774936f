//! End-to-end selector flows over the in-memory API and a real
//! temp-dir selection store.

use atrium_app::{
    ProjectProvider, ProjectSelector, SelectionStore, SelectorOutcome, MAX_PROJECTS,
};
use atrium_client::testing::InMemoryApi;
use atrium_types::{
    Industry, ModelType, NewProject, ProjectDescription, ProjectFunction, ProjectId, ProjectName,
    TryNew, UseCase,
};
use std::sync::Arc;
use tempfile::TempDir;

fn new_project(name: &str) -> NewProject {
    NewProject {
        name: ProjectName::try_new(name.into()).unwrap(),
        description: ProjectDescription::try_new("A project".into()).unwrap(),
        industry: Industry::Education,
        use_case: UseCase::Research,
        model_type: ModelType::Gpt4oMini,
        function: ProjectFunction::SearchAndChat,
    }
}

fn store_in(dir: &TempDir) -> SelectionStore {
    SelectionStore::new(dir.path().to_path_buf()).unwrap()
}

#[tokio::test]
async fn empty_account_opens_create_modal() {
    let api = Arc::new(InMemoryApi::new());
    let dir = TempDir::new().unwrap();
    let provider = ProjectProvider::new();

    let mut selector = ProjectSelector::new(api, store_in(&dir), provider.handle());
    assert_eq!(selector.initialize().await, SelectorOutcome::OpenCreateModal);
    assert!(provider.handle().selected().is_none());
}

#[tokio::test]
async fn fetch_failure_opens_create_modal() {
    let api = Arc::new(InMemoryApi::new());
    api.seed_project("Hidden");
    api.fail_all(true);
    let dir = TempDir::new().unwrap();
    let provider = ProjectProvider::new();

    let mut selector = ProjectSelector::new(api, store_in(&dir), provider.handle());
    assert_eq!(selector.initialize().await, SelectorOutcome::OpenCreateModal);
}

#[tokio::test]
async fn defaults_to_last_listed_project() {
    let api = Arc::new(InMemoryApi::new());
    api.seed_project("First");
    api.seed_project("Second");
    let last = api.seed_project("Third");
    let dir = TempDir::new().unwrap();
    let provider = ProjectProvider::new();

    let mut selector = ProjectSelector::new(api, store_in(&dir), provider.handle());
    match selector.initialize().await {
        SelectorOutcome::Selected(p) => assert_eq!(p.id, last.id),
        SelectorOutcome::OpenCreateModal => panic!("expected a selection"),
    }
    assert_eq!(provider.handle().selected_id(), Some(last.id));
}

#[tokio::test]
async fn persisted_selection_survives_restart() {
    let api = Arc::new(InMemoryApi::new());
    let first = api.seed_project("First");
    api.seed_project("Second");
    let dir = TempDir::new().unwrap();

    // First run: pick a non-default project.
    {
        let provider = ProjectProvider::new();
        let mut selector =
            ProjectSelector::new(api.clone(), store_in(&dir), provider.handle());
        selector.initialize().await;
        assert!(selector.select(&first.id).await.is_some());
    }

    // Second run restores it instead of defaulting to the last entry.
    let provider = ProjectProvider::new();
    let mut selector = ProjectSelector::new(api, store_in(&dir), provider.handle());
    match selector.initialize().await {
        SelectorOutcome::Selected(p) => assert_eq!(p.id, first.id),
        SelectorOutcome::OpenCreateModal => panic!("expected restored selection"),
    }
}

#[tokio::test]
async fn stale_persisted_selection_falls_back() {
    let api = Arc::new(InMemoryApi::new());
    let kept = api.seed_project("Kept");
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    // A selection pointing at a project this account no longer has.
    store.save(&ProjectId::new("deleted-elsewhere")).await.unwrap();

    let provider = ProjectProvider::new();
    let mut selector = ProjectSelector::new(api, store, provider.handle());
    match selector.initialize().await {
        SelectorOutcome::Selected(p) => assert_eq!(p.id, kept.id),
        SelectorOutcome::OpenCreateModal => panic!("expected fallback selection"),
    }
}

#[tokio::test]
async fn create_appends_selects_and_persists() {
    let api = Arc::new(InMemoryApi::new());
    api.seed_project("Existing");
    let dir = TempDir::new().unwrap();
    let provider = ProjectProvider::new();

    let mut selector = ProjectSelector::new(api, store_in(&dir), provider.handle());
    selector.initialize().await;

    let created = selector.create(new_project("Fresh")).await.unwrap();
    assert_eq!(provider.handle().selected_id(), Some(created.id.clone()));
    assert_eq!(selector.projects().len(), 2);

    // The new selection is durable.
    assert_eq!(store_in(&dir).load().await.unwrap(), Some(created.id));
}

#[tokio::test]
async fn cap_blocks_creation() {
    let api = Arc::new(InMemoryApi::new());
    for i in 0..MAX_PROJECTS {
        api.seed_project(&format!("P{i}"));
    }
    let dir = TempDir::new().unwrap();
    let provider = ProjectProvider::new();

    let mut selector = ProjectSelector::new(api, store_in(&dir), provider.handle());
    selector.initialize().await;
    assert!(!selector.can_create());
    assert!(selector.create(new_project("One too many")).await.is_err());
    assert_eq!(selector.projects().len(), MAX_PROJECTS);
}
