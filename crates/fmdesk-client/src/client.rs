//! Thin HTTP wrapper over the backend task routes.
//!
//! Methods return raw JSON records; normalization into canonical tasks is
//! left to the caller so the same client serves every role.

use std::time::Duration;

use fmdesk_config::ApiConfig;
use fmdesk_core::enums::TaskStatus;
use fmdesk_core::requests::{TaskDraft, TaskFilter, TaskUpdate};
use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};

use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::http::{check_response, read_json, unwrap_list, unwrap_record};
use crate::outcome::ApiOutcome;

const USER_AGENT: &str = concat!("fmdesk/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the facility backend's `/api/tasks` routes.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    demo_fallback: bool,
}

#[derive(Debug)]
pub struct TaskApiClientBuilder {
    base_url: String,
    credentials: Credentials,
    timeout: Duration,
    demo_fallback: bool,
}

impl TaskApiClientBuilder {
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Answer read 404s with [`ApiOutcome::NotDeployedFallback`].
    #[must_use]
    pub const fn demo_fallback(mut self, enabled: bool) -> Self {
        self.demo_fallback = enabled;
        self
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying `reqwest::Client` fails to build.
    pub fn build(self) -> Result<TaskApiClient, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;
        tracing::debug!(
            base_url = %self.base_url,
            anonymous = self.credentials.is_anonymous(),
            demo_fallback = self.demo_fallback,
            "task API client built"
        );
        Ok(TaskApiClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            credentials: self.credentials,
            demo_fallback: self.demo_fallback,
        })
    }
}

impl TaskApiClient {
    /// Start building a client for the backend at `base_url` (without `/api`).
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> TaskApiClientBuilder {
        TaskApiClientBuilder {
            base_url: base_url.into(),
            credentials: Credentials::anonymous(),
            timeout: Duration::from_secs(30),
            demo_fallback: true,
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let credentials = config
            .bearer_token()
            .map_or_else(Credentials::anonymous, Credentials::bearer);
        Self::builder(config.trimmed_base_url())
            .credentials(credentials)
            .timeout(Duration::from_secs(config.timeout_secs))
            .demo_fallback(config.demo_fallback)
            .build()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn demo_fallback_enabled(&self) -> bool {
        self.demo_fallback
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: &str, suffix: &str) -> String {
        format!("{}/{}{suffix}", self.tasks_url(), urlencoding::encode(id))
    }

    fn list_url(&self, filter: &TaskFilter) -> String {
        let query = filter
            .query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            self.tasks_url()
        } else {
            format!("{}?{query}", self.tasks_url())
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.header_value() {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let resp = check_response(self.authorize(request).send().await?).await?;
        read_json(resp).await
    }

    /// `GET /api/tasks` with optional filters.
    ///
    /// A 404 becomes [`ApiOutcome::NotDeployedFallback`] with an empty list
    /// when demo fallback is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-404 error status, or an
    /// unrecognised body shape.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<ApiOutcome<Vec<Value>>, ApiError> {
        let url = self.list_url(filter);
        tracing::debug!(%url, "listing tasks");
        match self.send(self.http.get(&url)).await {
            Ok(body) => unwrap_list(body).map(ApiOutcome::Fetched),
            Err(err) if err.is_not_found() && self.demo_fallback => {
                tracing::info!(%url, "task list endpoint not deployed; returning an empty list");
                Ok(ApiOutcome::NotDeployedFallback(Vec::new()))
            }
            Err(err) => Err(err),
        }
    }

    /// `GET /api/tasks/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status
    /// (including 404 for an unknown id).
    pub async fn get_task(&self, id: &str) -> Result<Value, ApiError> {
        let url = self.task_url(id, "");
        tracing::debug!(%url, "fetching task");
        self.send(self.http.get(&url)).await.map(unwrap_record)
    }

    /// `POST /api/tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Value, ApiError> {
        tracing::debug!(title = %draft.title, "creating task");
        self.send(self.http.post(self.tasks_url()).json(draft))
            .await
            .map(unwrap_record)
    }

    /// `PUT /api/tasks/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Value, ApiError> {
        tracing::debug!(id, "updating task");
        self.send(self.http.put(self.task_url(id, "")).json(update))
            .await
            .map(unwrap_record)
    }

    /// `PATCH /api/tasks/:id/status` with `{status: "<lowercase>"}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn patch_status(&self, id: &str, status: TaskStatus) -> Result<Value, ApiError> {
        tracing::debug!(id, %status, "patching task status");
        let body = json!({ "status": status.wire_str() });
        self.send(self.http.patch(self.task_url(id, "/status")).json(&body))
            .await
    }

    /// `POST /api/tasks/:id/approve` with `{approved: true}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn post_approve(&self, id: &str) -> Result<Value, ApiError> {
        tracing::debug!(id, "approving task");
        let body = json!({ "approved": true });
        self.send(self.http.post(self.task_url(id, "/approve")).json(&body))
            .await
    }

    /// `POST /api/tasks/:id/reject` with `{rejected: true, comment?}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn post_reject(&self, id: &str, comment: Option<&str>) -> Result<Value, ApiError> {
        tracing::debug!(id, "rejecting task");
        let mut body = json!({ "rejected": true });
        if let Some(comment) = comment {
            body["comment"] = Value::String(comment.to_string());
        }
        self.send(self.http.post(self.task_url(id, "/reject")).json(&body))
            .await
    }
}
