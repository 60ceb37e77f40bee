//! Screen-level task operations.
//!
//! Every read re-fetches and re-normalizes; there is no cache. Reads never
//! fail outright: an error becomes an empty, degraded snapshot with a banner.
//! Writes surface their errors.

use chrono::{DateTime, Utc};
use fmdesk_config::FmdeskConfig;
use fmdesk_core::entities::Task;
use fmdesk_core::enums::{Role, TaskStatus};
use fmdesk_core::normalize::{normalize_task, normalize_tasks};
use fmdesk_core::requests::{TaskDraft, TaskFilter, TaskUpdate};
use fmdesk_core::views::{Dashboard, DashboardOptions};
use fmdesk_core::workflow::require_comment;

use crate::client::TaskApiClient;
use crate::error::{ApiError, ServiceError};
use crate::outcome::ApiOutcome;
use crate::workflow::ApprovalOutcome;

/// Banner shown when the task list endpoint is not deployed.
pub const NOT_DEPLOYED_BANNER: &str =
    "The task service is not available on this backend yet; no tasks to show.";

/// Where a snapshot's tasks came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Live,
    NotDeployedFallback,
    /// The read failed; the list is empty.
    Degraded,
}

/// One normalized read of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub tasks: Vec<Task>,
    pub source: SnapshotSource,
    /// User-visible notice for fallback and degraded reads.
    pub banner: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl TaskSnapshot {
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.source, SnapshotSource::Degraded)
    }
}

/// Result of a workflow action plus the refetched list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub outcome: ApprovalOutcome,
    pub snapshot: TaskSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    pub require_reject_comment: bool,
    pub dashboard: DashboardOptions,
}

impl ServiceOptions {
    #[must_use]
    pub const fn from_config(config: &FmdeskConfig) -> Self {
        Self {
            require_reject_comment: config.workflow.require_reject_comment,
            dashboard: DashboardOptions {
                activity_limit: config.dashboard.activity_limit,
                default_estimate_minutes: config.dashboard.default_estimate_minutes,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskService {
    client: TaskApiClient,
    options: ServiceOptions,
}

impl TaskService {
    #[must_use]
    pub const fn new(client: TaskApiClient, options: ServiceOptions) -> Self {
        Self { client, options }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client cannot be built.
    pub fn from_config(config: &FmdeskConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            TaskApiClient::from_config(&config.api)?,
            ServiceOptions::from_config(config),
        ))
    }

    #[must_use]
    pub const fn client(&self) -> &TaskApiClient {
        &self.client
    }

    #[must_use]
    pub const fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Fetch, normalize, and filter the task list. Never fails.
    pub async fn snapshot(&self, filter: &TaskFilter) -> TaskSnapshot {
        let fetched_at = Utc::now();
        match self.client.list_tasks(filter).await {
            Ok(outcome) => {
                let source = if outcome.is_fallback() {
                    SnapshotSource::NotDeployedFallback
                } else {
                    SnapshotSource::Live
                };
                let outcome = outcome.map(|raw| normalize_tasks(&raw, fetched_at));
                tracing::debug!(count = outcome.value().len(), ?source, "task list read");
                let mut tasks = outcome.into_inner();
                tasks.retain(|task| filter.matches(task));
                TaskSnapshot {
                    tasks,
                    source,
                    banner: (source == SnapshotSource::NotDeployedFallback)
                        .then(|| NOT_DEPLOYED_BANNER.to_string()),
                    fetched_at,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "task list read failed; showing empty list");
                TaskSnapshot {
                    tasks: Vec::new(),
                    source: SnapshotSource::Degraded,
                    banner: Some(format!("Could not load tasks: {err}")),
                    fetched_at,
                }
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] if the task does not exist or the read fails.
    pub async fn get(&self, id: &str) -> Result<Task, ServiceError> {
        self.client.fetch_task(id, Utc::now()).await
    }

    /// Create a task. Validation runs before any request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] for an invalid draft, a failed request, or a
    /// response that cannot be normalized.
    pub async fn create(&self, draft: &TaskDraft) -> Result<Task, ServiceError> {
        draft.validate()?;
        let raw = self.client.create_task(draft).await?;
        let task = normalize_task(&raw, Utc::now())?;
        if task.status != TaskDraft::initial_status() {
            tracing::warn!(
                id = %task.id,
                status = %task.status,
                "backend created task outside the initial status"
            );
        }
        Ok(task)
    }

    /// Apply a partial update. Validation runs before any request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] for an invalid update, a failed request, or a
    /// response that cannot be normalized.
    pub async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, ServiceError> {
        update.validate()?;
        let raw = self.client.update_task(id, update).await?;
        Ok(normalize_task(&raw, Utc::now())?)
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] if the task is unknown, the transition is not
    /// allowed, or the patch fails.
    pub async fn set_status(&self, id: &str, next: TaskStatus) -> Result<Task, ServiceError> {
        self.client.change_status(id, next, Utc::now()).await
    }

    /// Approve, then refetch the list.
    ///
    /// # Errors
    ///
    /// See [`TaskApiClient::approve`].
    pub async fn approve(&self, id: &str) -> Result<WorkflowReport, ServiceError> {
        let outcome = self.client.approve(id, Utc::now()).await?;
        let snapshot = self.snapshot(&TaskFilter::default()).await;
        Ok(WorkflowReport { outcome, snapshot })
    }

    /// Reject, then refetch the list.
    ///
    /// # Errors
    ///
    /// Returns a validation error without sending anything when a comment is
    /// required and missing; otherwise see [`TaskApiClient::reject`].
    pub async fn reject(&self, id: &str, comment: Option<&str>) -> Result<WorkflowReport, ServiceError> {
        if self.options.require_reject_comment {
            require_comment(comment)?;
        }
        let outcome = self.client.reject(id, comment, Utc::now()).await?;
        let snapshot = self.snapshot(&TaskFilter::default()).await;
        Ok(WorkflowReport { outcome, snapshot })
    }

    /// Dashboard for `role`, optionally scoped to one assignee.
    pub async fn dashboard(&self, role: Role, assignee_id: Option<&str>) -> (Dashboard, TaskSnapshot) {
        let filter = TaskFilter {
            assignee_id: assignee_id.map(str::to_string),
            ..TaskFilter::default()
        };
        let snapshot = self.snapshot(&filter).await;
        let dashboard = Dashboard::build(
            &snapshot.tasks,
            role,
            snapshot.fetched_at,
            self.options.dashboard,
        );
        (dashboard, snapshot)
    }
}
