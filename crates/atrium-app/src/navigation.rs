//! Navigation shell: the permission-filtered tab surface.
//!
//! The tab set is a pure function of the selected project's
//! `function` and the caller's resolved permission. The shell renders
//! nothing at all until both are known — a partial tab bar is worse
//! than none.

use crate::ProjectContext;
use atrium_auth::PermissionResolver;
use atrium_client::ProjectApi;
use atrium_types::{PermissionLevel, ProjectFunction};
use std::sync::Arc;
use tracing::debug;

/// One navigation tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Landing page; always present, ungated.
    Dashboard,
    /// Semantic search (search-and-chat projects).
    Search,
    /// Chat surface (search-and-chat projects).
    Chat,
    /// File management (search-and-chat projects).
    Files,
    /// Background jobs (search-and-chat projects).
    Jobs,
    /// API key management (search-and-chat projects, managers only).
    ApiKeys,
    /// Billing overview; always present, managers only.
    CostAndUsage,
    /// Project settings; always present, managers only.
    Settings,
    /// Application configuration (application-ai projects).
    Configure,
}

impl Tab {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Search => "Search",
            Self::Chat => "Chat",
            Self::Files => "Files",
            Self::Jobs => "Jobs",
            Self::ApiKeys => "API Keys",
            Self::CostAndUsage => "Cost and Usage",
            Self::Settings => "Settings",
            Self::Configure => "Configure",
        }
    }

    /// Route path this tab navigates to.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Search => "/view/search",
            Self::Chat => "/view/chat",
            Self::Files => "/view/files",
            Self::Jobs => "/view/jobs",
            Self::ApiKeys => "/view/api-keys",
            Self::CostAndUsage => "/view/cost-and-usage",
            Self::Settings => "/view/settings",
            Self::Configure => "/view/configure",
        }
    }
}

/// The fixed, ordered tab list for a project function and a resolved
/// permission.
///
/// Manager-gated tabs (API Keys, Cost and Usage, Settings) appear only
/// for owners and editors; an unresolved permission (`None`) excludes
/// them, consistent with the fail-closed gate.
///
/// # Example
///
/// ```
/// use atrium_app::{tabs_for, Tab};
/// use atrium_types::{PermissionLevel, ProjectFunction};
///
/// let tabs = tabs_for(ProjectFunction::ApplicationAi, Some(PermissionLevel::Viewer));
/// assert_eq!(tabs, [Tab::Dashboard, Tab::Configure]);
/// ```
#[must_use]
pub fn tabs_for(function: ProjectFunction, permission: Option<PermissionLevel>) -> Vec<Tab> {
    let manages = permission.is_some_and(PermissionLevel::can_manage);

    let mut tabs = vec![Tab::Dashboard];
    match function {
        ProjectFunction::SearchAndChat => {
            tabs.extend([Tab::Search, Tab::Chat, Tab::Files, Tab::Jobs]);
            if manages {
                tabs.push(Tab::ApiKeys);
            }
        }
        ProjectFunction::ApplicationAi => tabs.push(Tab::Configure),
    }
    if manages {
        tabs.extend([Tab::CostAndUsage, Tab::Settings]);
    }
    tabs
}

/// Derives the highlighted tab from the current route path.
///
/// Substring match against `/view/settings` and `/dashboard` only;
/// other tabs never become active through this mechanism. (A known
/// gap inherited from the dashboard design.)
#[must_use]
pub fn active_tab(path: &str) -> Option<Tab> {
    if path.contains("/view/settings") {
        Some(Tab::Settings)
    } else if path.contains("/dashboard") {
        Some(Tab::Dashboard)
    } else {
        None
    }
}

/// The navigation shell bound to the live selection.
///
/// [`tabs`](Self::tabs) returns `None` until a project is selected
/// *and* its detail record (with `function`) has been fetched —
/// navigation is suppressed entirely rather than rendered partially.
pub struct NavigationShell {
    context: ProjectContext,
    api: Arc<dyn ProjectApi>,
    resolver: PermissionResolver,
}

impl NavigationShell {
    /// Creates a shell over the selection context.
    #[must_use]
    pub fn new(
        context: ProjectContext,
        api: Arc<dyn ProjectApi>,
        resolver: PermissionResolver,
    ) -> Self {
        Self {
            context,
            api,
            resolver,
        }
    }

    /// Computes the tab list for the current selection.
    ///
    /// Fetches the project detail (the list record's `function` is
    /// not trusted) and re-resolves the permission on every call.
    pub async fn tabs(&self) -> Option<Vec<Tab>> {
        let selected = self.context.selected_id()?;
        let detail = match self.api.project_detail(&selected).await {
            Ok(detail) => detail,
            Err(err) => {
                debug!(project = %selected, error = %err, "detail fetch failed; hiding navigation");
                return None;
            }
        };
        let function = detail.function?;
        let permission = self.resolver.resolve(&selected).await;
        Some(tabs_for(function, permission))
    }
}
