//! The [`ProjectApi`] trait and its `reqwest` implementation.

use crate::{ApiError, TokenProvider};
use async_trait::async_trait;
use atrium_types::{Member, NewProject, PermissionLevel, Project, ProjectId, ProjectPatch, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// The eleven operations of the external dashboard API.
///
/// This is the seam between flows and transport: `atrium-auth` and
/// `atrium-app` depend on `Arc<dyn ProjectApi>`, so tests substitute
/// [`crate::testing::InMemoryApi`] for the network.
///
/// Semantics shared by all operations:
///
/// - Authenticated with a bearer token; a missing token yields
///   [`ApiError::MissingToken`] without touching the network.
/// - No retries, no caching, no request timeout.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// `GET /projects/` — every project the caller belongs to.
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// `POST /projects/` — creates a project owned by the caller.
    async fn create_project(&self, new: &NewProject) -> Result<Project, ApiError>;

    /// `GET /projects/{id}` — full project detail.
    async fn project_detail(&self, id: &ProjectId) -> Result<Project, ApiError>;

    /// `PATCH /projects/{id}` — partial update of editable fields.
    async fn update_project(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
    ) -> Result<Project, ApiError>;

    /// `DELETE /projects/{id}` — permanently deletes a project.
    async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError>;

    /// `GET /projects/{id}/permissions` — the caller's permission for
    /// one project.
    async fn permission(&self, id: &ProjectId) -> Result<PermissionLevel, ApiError>;

    /// `GET /projects/{id}/members` — the project member list.
    async fn members(&self, id: &ProjectId) -> Result<Vec<Member>, ApiError>;

    /// `PATCH /projects/{id}/members/{member}/permission` — changes a
    /// member's role.
    async fn set_member_permission(
        &self,
        id: &ProjectId,
        member: &UserId,
        level: PermissionLevel,
    ) -> Result<(), ApiError>;

    /// `DELETE /projects/{id}/members/{member}` — removes a member.
    async fn remove_member(&self, id: &ProjectId, member: &UserId) -> Result<(), ApiError>;

    /// `POST /projects/{id}/invite` — invites an email with a role.
    async fn invite(
        &self,
        id: &ProjectId,
        email: &str,
        level: PermissionLevel,
    ) -> Result<(), ApiError>;

    /// `POST /users/` — idempotent user upsert. `200` and `409`
    /// (already registered) are both success.
    async fn upsert_user(&self) -> Result<(), ApiError>;
}

/// Wire shape of `GET /projects/{id}/permissions`.
#[derive(Debug, Deserialize)]
struct PermissionResponse {
    permission: PermissionLevel,
}

/// Wire shape of `PATCH .../members/{member}/permission`.
#[derive(Debug, Serialize)]
struct PermissionBody {
    permission: PermissionLevel,
}

/// Wire shape of `POST /projects/{id}/invite`.
#[derive(Debug, Serialize)]
struct InviteBody<'a> {
    email: &'a str,
    permission: PermissionLevel,
}

/// `reqwest`-backed implementation of [`ProjectApi`].
///
/// Cheap to clone; the inner `reqwest::Client` holds the connection
/// pool and is reused across all requests.
///
/// # Example
///
/// ```no_run
/// use atrium_client::{ApiClient, ProjectApi, StaticToken};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), atrium_client::ApiError> {
/// let api = ApiClient::new(
///     "https://api.example.com",
///     Arc::new(StaticToken::new("token")),
/// );
/// let projects = api.list_projects().await?;
/// println!("{} projects", projects.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    ///
    /// A trailing slash on `base_url` is tolerated and stripped.
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    /// Returns the configured base URL (without trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Builds an authorized request, or fails with `MissingToken`.
    async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let token = self
            .tokens
            .bearer_token()
            .await
            .ok_or(ApiError::MissingToken)?;
        debug!(%method, path, "api request");
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(token)
            .header("Content-Type", "application/json"))
    }

    /// Sends a request and classifies the response status.
    ///
    /// Non-success responses are drained for a server message
    /// (`message` or `error` JSON field, else raw text).
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let resp = req.send().await.map_err(ApiError::Transport)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = server_message(resp).await;
        warn!(status = status.as_u16(), %message, "api request failed");
        Err(ApiError::status(status.as_u16(), message))
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(req).await?.json().await.map_err(ApiError::Decode)
    }
}

/// Extracts a human-readable message from an error response body.
async fn server_message(resp: reqwest::Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body
}

#[async_trait]
impl ProjectApi for ApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let req = self.request(reqwest::Method::GET, "/projects/").await?;
        self.send_json(req).await
    }

    async fn create_project(&self, new: &NewProject) -> Result<Project, ApiError> {
        let req = self.request(reqwest::Method::POST, "/projects/").await?;
        self.send_json(req.json(new)).await
    }

    async fn project_detail(&self, id: &ProjectId) -> Result<Project, ApiError> {
        let path = format!("/projects/{id}");
        let req = self.request(reqwest::Method::GET, &path).await?;
        self.send_json(req).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
    ) -> Result<Project, ApiError> {
        let path = format!("/projects/{id}");
        let req = self.request(reqwest::Method::PATCH, &path).await?;
        self.send_json(req.json(patch)).await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError> {
        let path = format!("/projects/{id}");
        let req = self.request(reqwest::Method::DELETE, &path).await?;
        self.send(req).await?;
        Ok(())
    }

    async fn permission(&self, id: &ProjectId) -> Result<PermissionLevel, ApiError> {
        let path = format!("/projects/{id}/permissions");
        let req = self.request(reqwest::Method::GET, &path).await?;
        let resp: PermissionResponse = self.send_json(req).await?;
        Ok(resp.permission)
    }

    async fn members(&self, id: &ProjectId) -> Result<Vec<Member>, ApiError> {
        let path = format!("/projects/{id}/members");
        let req = self.request(reqwest::Method::GET, &path).await?;
        self.send_json(req).await
    }

    async fn set_member_permission(
        &self,
        id: &ProjectId,
        member: &UserId,
        level: PermissionLevel,
    ) -> Result<(), ApiError> {
        let path = format!("/projects/{id}/members/{member}/permission");
        let req = self.request(reqwest::Method::PATCH, &path).await?;
        self.send(req.json(&PermissionBody { permission: level }))
            .await?;
        Ok(())
    }

    async fn remove_member(&self, id: &ProjectId, member: &UserId) -> Result<(), ApiError> {
        let path = format!("/projects/{id}/members/{member}");
        let req = self.request(reqwest::Method::DELETE, &path).await?;
        self.send(req).await?;
        Ok(())
    }

    async fn invite(
        &self,
        id: &ProjectId,
        email: &str,
        level: PermissionLevel,
    ) -> Result<(), ApiError> {
        let path = format!("/projects/{id}/invite");
        let req = self.request(reqwest::Method::POST, &path).await?;
        self.send(req.json(&InviteBody {
            email,
            permission: level,
        }))
        .await?;
        Ok(())
    }

    async fn upsert_user(&self) -> Result<(), ApiError> {
        let req = self.request(reqwest::Method::POST, "/users/").await?;
        let resp = req.send().await.map_err(ApiError::Transport)?;
        let status = resp.status();
        // 409 means the user row already exists; that is success for
        // an idempotent upsert.
        if status.is_success() || status.as_u16() == 409 {
            return Ok(());
        }
        let message = server_message(resp).await;
        warn!(status = status.as_u16(), %message, "user upsert failed");
        Err(ApiError::status(status.as_u16(), message))
    }
}
