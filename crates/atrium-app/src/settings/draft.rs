//! The editable-fields draft of the settings screen.

use atrium_client::{ApiError, ProjectApi};
use atrium_types::{ErrorCode, Industry, ModelType, Project, ProjectId, ProjectPatch, UseCase};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Error from the settings screen.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Save was requested with no field changed. The save control is
    /// only enabled after a change, so reaching this is a UI bug.
    #[error("no fields changed")]
    NoChanges,

    /// The API rejected or failed the call.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ErrorCode for SettingsError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoChanges => "APP_SETTINGS_NO_CHANGES",
            Self::Api(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::NoChanges => false,
            Self::Api(e) => e.is_recoverable(),
        }
    }
}

/// The settings screen: fetched project detail plus a draft of the
/// editable fields.
///
/// `name` and `function` are displayed but immutable; the draft only
/// covers description, industry, use case and model type. Saving
/// submits a PATCH of the changed fields and then *refetches* the
/// detail — server state replaces the draft wholesale, no local
/// merge.
///
/// # Example
///
/// ```no_run
/// use atrium_app::settings::SettingsScreen;
/// use atrium_types::{Industry, ProjectId};
/// # use std::sync::Arc;
/// # async fn example(api: Arc<dyn atrium_client::ProjectApi>) -> Result<(), atrium_app::settings::SettingsError> {
/// let mut screen = SettingsScreen::load(api, &ProjectId::new("p1")).await?;
/// assert!(!screen.is_changed());
/// screen.set_industry(Industry::Education);
/// if screen.is_changed() {
///     screen.save().await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct SettingsScreen {
    api: Arc<dyn ProjectApi>,
    project: Project,
    description: String,
    industry: Option<Industry>,
    use_case: Option<UseCase>,
    model_type: Option<ModelType>,
}

impl SettingsScreen {
    /// Fetches the project detail and pre-populates the draft.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the detail fetch
    /// fails.
    pub async fn load(api: Arc<dyn ProjectApi>, id: &ProjectId) -> Result<Self, SettingsError> {
        let project = api.project_detail(id).await?;
        Ok(Self {
            description: project.description.clone().unwrap_or_default(),
            industry: project.industry,
            use_case: project.use_case,
            model_type: project.model_type,
            project,
            api,
        })
    }

    /// The fetched project detail backing this screen.
    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Sets the draft description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Sets the draft industry.
    pub fn set_industry(&mut self, industry: Industry) {
        self.industry = Some(industry);
    }

    /// Sets the draft use case.
    pub fn set_use_case(&mut self, use_case: UseCase) {
        self.use_case = Some(use_case);
    }

    /// Sets the draft model type.
    pub fn set_model_type(&mut self, model_type: ModelType) {
        self.model_type = Some(model_type);
    }

    /// Whether at least one draft field differs from the fetched
    /// value. The save control is enabled exactly when this is true.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.to_patch().is_empty()
    }

    /// Builds the PATCH body from the changed fields only.
    fn to_patch(&self) -> ProjectPatch {
        let fetched_description = self.project.description.clone().unwrap_or_default();
        ProjectPatch {
            description: (self.description != fetched_description)
                .then(|| self.description.clone()),
            industry: self.industry.filter(|v| Some(*v) != self.project.industry),
            use_case: self.use_case.filter(|v| Some(*v) != self.project.use_case),
            model_type: self
                .model_type
                .filter(|v| Some(*v) != self.project.model_type),
        }
    }

    /// Submits the changed fields and reloads server state.
    ///
    /// # Errors
    ///
    /// [`SettingsError::NoChanges`] when nothing differs, or the
    /// underlying [`ApiError`]. On failure the draft is left intact
    /// so the user can retry.
    pub async fn save(&mut self) -> Result<(), SettingsError> {
        let patch = self.to_patch();
        if patch.is_empty() {
            return Err(SettingsError::NoChanges);
        }
        self.api.update_project(&self.project.id, &patch).await?;
        info!(project = %self.project.id, "project settings saved");

        // Forcible reload: refetch and rebuild the draft from server
        // state rather than merging locally.
        let project = self.api.project_detail(&self.project.id).await?;
        self.description = project.description.clone().unwrap_or_default();
        self.industry = project.industry;
        self.use_case = project.use_case;
        self.model_type = project.model_type;
        self.project = project;
        Ok(())
    }
}
