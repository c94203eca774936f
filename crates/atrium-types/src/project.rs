//! Project model: enums, validated fields, and wire payloads.
//!
//! A project is a tenant-scoped workspace. Its `function` selects
//! which navigation tabs the shell renders; `industry`, `use_case`
//! and `model_type` are metadata consumed by the out-of-scope
//! processing backend.

use crate::{ProjectId, TryNew};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum length of a project name, enforced by the API.
pub const MAX_NAME_LEN: usize = 25;

/// Maximum length of a project description, enforced by the API.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Industry a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    /// Schools, universities, research institutions.
    Education,
    /// Startups and commercial ventures.
    Entrepreneurial,
}

/// Primary use case of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseCase {
    /// Academic or internal research.
    Research,
    /// Classroom and training material.
    Teaching,
    /// Live production workloads.
    Production,
    /// Licensed redistribution.
    Licensing,
}

/// Model variant a project is provisioned with.
///
/// The wire names are fixed by the external API and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    /// Compact model optimized for lower resource usage.
    #[serde(rename = "openai-gpt-4o-mini")]
    Gpt4oMini,
    /// Full model with the wider capability range.
    #[serde(rename = "openai-gpt-4o")]
    Gpt4o,
}

/// Feature profile of a project.
///
/// Determines which navigation tabs appear (see the navigation shell
/// in `atrium-app`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectFunction {
    /// Search plus chat: Search, Chat, Files, Jobs and API Keys tabs.
    #[serde(rename = "search-and-chat")]
    SearchAndChat,
    /// Embedded application AI: the Configure tab only.
    #[serde(rename = "application-ai")]
    ApplicationAi,
}

impl ProjectFunction {
    /// Wire name of this function.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::SearchAndChat => "search-and-chat",
            Self::ApplicationAi => "application-ai",
        }
    }
}

impl fmt::Display for ProjectFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Validation error for a project text field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectFieldError {
    /// The field was empty or whitespace-only.
    #[error("{field} must not be blank")]
    Blank {
        /// Field name for the inline message.
        field: &'static str,
    },

    /// The field exceeded its maximum length.
    #[error("{field} is {len} characters, maximum is {max}")]
    TooLong {
        /// Field name for the inline message.
        field: &'static str,
        /// Actual character count.
        len: usize,
        /// Maximum allowed character count.
        max: usize,
    },
}

/// A validated project name: non-blank, at most [`MAX_NAME_LEN`] chars.
///
/// # Example
///
/// ```
/// use atrium_types::{ProjectName, TryNew};
///
/// assert!(ProjectName::try_new("Atlas".to_string()).is_ok());
/// assert!(ProjectName::try_new("  ".to_string()).is_err());
/// assert!(ProjectName::try_new("x".repeat(26)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryNew for ProjectName {
    type Error = ProjectFieldError;
    type Args = String;

    fn try_new(value: String) -> Result<Self, Self::Error> {
        validate_text("name", &value, MAX_NAME_LEN)?;
        Ok(Self(value))
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated project description: non-blank, at most
/// [`MAX_DESCRIPTION_LEN`] chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryNew for ProjectDescription {
    type Error = ProjectFieldError;
    type Args = String;

    fn try_new(value: String) -> Result<Self, Self::Error> {
        validate_text("description", &value, MAX_DESCRIPTION_LEN)?;
        Ok(Self(value))
    }
}

fn validate_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ProjectFieldError> {
    if value.trim().is_empty() {
        return Err(ProjectFieldError::Blank { field });
    }
    let len = value.chars().count();
    if len > max {
        return Err(ProjectFieldError::TooLong { field, len, max });
    }
    Ok(())
}

/// A project as returned by the external API.
///
/// Only `id` and `name` are guaranteed present in list responses;
/// detail responses populate the rest. The navigation shell waits for
/// a detail fetch before trusting `function`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// API-issued identifier.
    pub id: ProjectId,

    /// Display name (≤ 25 chars).
    pub name: String,

    /// Free-text description (≤ 100 chars).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Industry classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,

    /// Primary use case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<UseCase>,

    /// Provisioned model variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<ModelType>,

    /// Feature profile selecting the navigation surface.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "function")]
    pub function: Option<ProjectFunction>,
}

/// Payload for `POST /projects/`.
///
/// Every field is required and pre-validated; the creation form cannot
/// submit a blank field because the typed constructors reject one.
///
/// # Example
///
/// ```
/// use atrium_types::{
///     Industry, ModelType, NewProject, ProjectDescription, ProjectFunction,
///     ProjectName, TryNew, UseCase,
/// };
///
/// let payload = NewProject {
///     name: ProjectName::try_new("Atlas".into()).unwrap(),
///     description: ProjectDescription::try_new("Course search".into()).unwrap(),
///     industry: Industry::Education,
///     use_case: UseCase::Teaching,
///     model_type: ModelType::Gpt4oMini,
///     function: ProjectFunction::SearchAndChat,
/// };
/// let json = serde_json::to_value(&payload).unwrap();
/// assert_eq!(json["function"], "search-and-chat");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name.
    pub name: ProjectName,
    /// Project description.
    pub description: ProjectDescription,
    /// Industry classification.
    pub industry: Industry,
    /// Primary use case.
    pub use_case: UseCase,
    /// Provisioned model variant.
    pub model_type: ModelType,
    /// Feature profile.
    pub function: ProjectFunction,
}

/// Payload for `PATCH /projects/{id}`.
///
/// Only the editable fields appear; `name` and `function` are
/// immutable after creation. `None` fields are omitted from the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    /// New description, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New industry, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,

    /// New use case, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_case: Option<UseCase>,

    /// New model variant, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<ModelType>,
}

impl ProjectPatch {
    /// Whether the patch carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.industry.is_none()
            && self.use_case.is_none()
            && self.model_type.is_none()
    }
}
