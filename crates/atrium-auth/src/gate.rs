//! The permission gate.

use crate::{PermissionResolver, DASHBOARD_ROUTE};
use atrium_types::{PermissionLevel, ProjectId, TryNew};
use thiserror::Error;

/// Decision produced by a gate check.
///
/// The consumer renders the gated subtree only on [`Render`]; every
/// other outcome leaves it absent.
///
/// [`Render`]: GateOutcome::Render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Permission not determinable yet: no project is selected. The
    /// gate stays in this state indefinitely until a selection exists.
    Loading,
    /// Resolved permission is in the allow-list: render the subtree.
    Render,
    /// Permission unresolved, or resolved but disallowed under the
    /// quiet variant: render nothing, stay on the current route.
    Hide,
    /// Strict variant only: permission resolved and disallowed.
    /// Render nothing and navigate to the contained route.
    Redirect(&'static str),
}

impl GateOutcome {
    /// Whether the gated subtree should render.
    #[must_use]
    pub fn should_render(self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Error constructing a gate with no allowed levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("permission gate requires a non-empty allow-list")]
pub struct EmptyAllowList;

/// A reusable authorization check over an allow-list of permission
/// levels.
///
/// Two variants exist, matching the two dashboard call sites:
///
/// - [`check`](Self::check) (strict): used at page level. A resolved
///   permission outside the allow-list redirects to the dashboard.
/// - [`check_quiet`](Self::check_quiet): used for widgets inside a
///   page. A disallowed permission hides the subtree without
///   navigating.
///
/// Both fail closed: an unresolved permission (`None` from the
/// resolver) hides the subtree and never redirects, so a transient
/// API failure cannot bounce the user off their current page.
///
/// # Example
///
/// ```
/// use atrium_auth::PermissionGate;
/// use atrium_types::{PermissionLevel, TryNew};
///
/// let gate = PermissionGate::try_new(vec![
///     PermissionLevel::Owner,
///     PermissionLevel::Editor,
/// ])
/// .unwrap();
/// assert!(gate.allows(PermissionLevel::Editor));
/// assert!(!gate.allows(PermissionLevel::Viewer));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionGate {
    allowed: Vec<PermissionLevel>,
}

impl TryNew for PermissionGate {
    type Error = EmptyAllowList;
    type Args = Vec<PermissionLevel>;

    fn try_new(allowed: Vec<PermissionLevel>) -> Result<Self, Self::Error> {
        if allowed.is_empty() {
            return Err(EmptyAllowList);
        }
        Ok(Self { allowed })
    }
}

impl PermissionGate {
    /// Gate allowing owners and editors — the most common allow-list
    /// (Settings, Cost and Usage, API Keys).
    #[must_use]
    pub fn managers() -> Self {
        Self {
            allowed: vec![PermissionLevel::Owner, PermissionLevel::Editor],
        }
    }

    /// Gate allowing owners only (project deletion).
    #[must_use]
    pub fn owner_only() -> Self {
        Self {
            allowed: vec![PermissionLevel::Owner],
        }
    }

    /// Whether a resolved level passes this gate.
    #[must_use]
    pub fn allows(&self, level: PermissionLevel) -> bool {
        self.allowed.contains(&level)
    }

    /// Strict check: resolves the permission for the selected project
    /// and redirects to the dashboard when it is resolved and
    /// disallowed.
    pub async fn check(
        &self,
        selected: Option<&ProjectId>,
        resolver: &PermissionResolver,
    ) -> GateOutcome {
        self.run(selected, resolver, true).await
    }

    /// Quiet check: identical resolution, but a disallowed permission
    /// hides the subtree instead of navigating.
    pub async fn check_quiet(
        &self,
        selected: Option<&ProjectId>,
        resolver: &PermissionResolver,
    ) -> GateOutcome {
        self.run(selected, resolver, false).await
    }

    async fn run(
        &self,
        selected: Option<&ProjectId>,
        resolver: &PermissionResolver,
        strict: bool,
    ) -> GateOutcome {
        let Some(project) = selected else {
            return GateOutcome::Loading;
        };
        match resolver.resolve(project).await {
            Some(level) if self.allows(level) => GateOutcome::Render,
            Some(_) if strict => GateOutcome::Redirect(DASHBOARD_ROUTE),
            // Disallowed under the quiet variant, or unresolved under
            // either: fail closed without navigating.
            Some(_) | None => GateOutcome::Hide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_client::testing::InMemoryApi;
    use std::sync::Arc;

    fn setup(level: Option<PermissionLevel>) -> (Arc<InMemoryApi>, ProjectId, PermissionResolver) {
        let api = Arc::new(InMemoryApi::new());
        let project = api.seed_project("Atlas");
        if let Some(level) = level {
            api.set_permission(&project.id, level);
        }
        let resolver = PermissionResolver::new(api.clone());
        (api, project.id, resolver)
    }

    #[test]
    fn empty_allow_list_is_rejected() {
        assert_eq!(PermissionGate::try_new(vec![]).unwrap_err(), EmptyAllowList);
    }

    #[tokio::test]
    async fn no_selected_project_stays_loading() {
        let (_api, _id, resolver) = setup(Some(PermissionLevel::Owner));
        let gate = PermissionGate::managers();
        assert_eq!(gate.check(None, &resolver).await, GateOutcome::Loading);
        assert_eq!(gate.check_quiet(None, &resolver).await, GateOutcome::Loading);
    }

    #[tokio::test]
    async fn allowed_permission_renders() {
        let (_api, id, resolver) = setup(Some(PermissionLevel::Editor));
        let gate = PermissionGate::managers();
        assert_eq!(gate.check(Some(&id), &resolver).await, GateOutcome::Render);
    }

    #[tokio::test]
    async fn disallowed_permission_redirects_under_strict() {
        // Property: for all permission values not in the allow-list,
        // the gate must not render and the strict variant navigates.
        let gate = PermissionGate::owner_only();
        for level in [PermissionLevel::Editor, PermissionLevel::Viewer] {
            let (_api, id, resolver) = setup(Some(level));
            let outcome = gate.check(Some(&id), &resolver).await;
            assert_eq!(outcome, GateOutcome::Redirect(DASHBOARD_ROUTE));
            assert!(!outcome.should_render());
        }
    }

    #[tokio::test]
    async fn disallowed_permission_hides_under_quiet() {
        let (_api, id, resolver) = setup(Some(PermissionLevel::Viewer));
        let gate = PermissionGate::managers();
        assert_eq!(
            gate.check_quiet(Some(&id), &resolver).await,
            GateOutcome::Hide
        );
    }

    #[tokio::test]
    async fn unresolved_permission_hides_without_redirect() {
        // Missing token / failed fetch both resolve to None; the
        // strict gate must NOT bounce the user off the page for that.
        let (_api, id, resolver) = setup(None);
        let gate = PermissionGate::managers();
        assert_eq!(gate.check(Some(&id), &resolver).await, GateOutcome::Hide);
    }
}
