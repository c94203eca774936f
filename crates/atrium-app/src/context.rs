//! Process-wide project selection context.
//!
//! A single slot holding the currently selected [`Project`]. The
//! provider owns the slot and lives for the life of the application
//! shell; handles are cheap clones distributed to every view that
//! needs the selection.

use atrium_types::Project;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Owner of the selection slot.
///
/// Create one provider at shell startup, hand out handles via
/// [`handle`](Self::handle), and keep the provider alive until
/// shutdown. The slot starts empty (`None`), is mutated only through
/// [`ProjectContext::set_selected`], and is never explicitly torn
/// down.
///
/// # Example
///
/// ```
/// use atrium_app::ProjectProvider;
///
/// let provider = ProjectProvider::new();
/// let ctx = provider.handle();
/// assert!(ctx.selected().is_none());
/// ```
#[derive(Debug, Default)]
pub struct ProjectProvider {
    slot: Arc<RwLock<Option<Project>>>,
}

impl ProjectProvider {
    /// Creates a provider with an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle onto the slot.
    #[must_use]
    pub fn handle(&self) -> ProjectContext {
        ProjectContext {
            slot: Arc::downgrade(&self.slot),
        }
    }
}

/// Handle to the selection slot.
///
/// Writes are last-write-wins; they are user-triggered and serialized
/// by the UI, so no contention protocol exists beyond the lock.
///
/// # Panics
///
/// Using a handle after its [`ProjectProvider`] has been dropped is a
/// programming error, equivalent to consuming the context outside its
/// provider. All accessors fail fast with a descriptive panic.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    slot: Weak<RwLock<Option<Project>>>,
}

impl ProjectContext {
    fn slot(&self) -> Arc<RwLock<Option<Project>>> {
        self.slot.upgrade().unwrap_or_else(|| {
            panic!(
                "ProjectContext used outside its ProjectProvider; \
                 keep the provider alive for the life of the application shell"
            )
        })
    }

    /// Returns a clone of the currently selected project, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Project> {
        self.slot().read().clone()
    }

    /// Returns just the selected project's id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<atrium_types::ProjectId> {
        self.slot().read().as_ref().map(|p| p.id.clone())
    }

    /// Replaces the selection (last write wins).
    pub fn set_selected(&self, project: Project) {
        *self.slot().write() = Some(project);
    }

    /// Empties the slot. Used by the sign-out flow only.
    pub fn clear(&self) {
        *self.slot().write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_types::ProjectId;

    fn project(id: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            name: id.to_string(),
            description: None,
            industry: None,
            use_case: None,
            model_type: None,
            function: None,
        }
    }

    #[test]
    fn starts_empty_and_last_write_wins() {
        let provider = ProjectProvider::new();
        let ctx = provider.handle();
        assert!(ctx.selected().is_none());

        ctx.set_selected(project("a"));
        ctx.set_selected(project("b"));
        assert_eq!(ctx.selected_id(), Some(ProjectId::new("b")));
    }

    #[test]
    fn handles_share_one_slot() {
        let provider = ProjectProvider::new();
        let writer = provider.handle();
        let reader = provider.handle();
        writer.set_selected(project("a"));
        assert_eq!(reader.selected_id(), Some(ProjectId::new("a")));
    }

    #[test]
    fn clear_empties_the_slot() {
        let provider = ProjectProvider::new();
        let ctx = provider.handle();
        ctx.set_selected(project("a"));
        ctx.clear();
        assert!(ctx.selected().is_none());
    }

    #[test]
    #[should_panic(expected = "outside its ProjectProvider")]
    fn orphaned_handle_fails_fast() {
        let ctx = {
            let provider = ProjectProvider::new();
            provider.handle()
        };
        let _ = ctx.selected();
    }
}
