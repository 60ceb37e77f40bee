//! Networked approve/reject, with the status-patch fallback for reject.

use chrono::{DateTime, Utc};
use fmdesk_core::entities::Task;
use fmdesk_core::enums::TaskStatus;
use fmdesk_core::errors::CoreError;
use fmdesk_core::normalize::normalize_task;
use fmdesk_core::workflow;

use crate::client::TaskApiClient;
use crate::error::{ApiError, ServiceError};

/// Which route carried a workflow action to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPath {
    /// The dedicated approve/reject endpoint.
    Direct,
    /// `PATCH /status` after the dedicated reject endpoint failed.
    StatusFallback,
}

impl WorkflowPath {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::StatusFallback => "status_fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalOutcome {
    /// The task as the workflow rules say it now stands.
    pub task: Task,
    pub path: WorkflowPath,
    /// Rejection comment sent with the request, if any.
    pub comment: Option<String>,
}

impl TaskApiClient {
    /// Fetch and normalize a task, mapping a 404 to [`CoreError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the task does not exist, the request fails,
    /// or the record cannot be normalized.
    pub async fn fetch_task(&self, id: &str, now: DateTime<Utc>) -> Result<Task, ServiceError> {
        let raw = self.get_task(id).await.map_err(|err| match err {
            err if err.is_not_found() => ServiceError::Core(CoreError::task_not_found(id)),
            err => ServiceError::Api(err),
        })?;
        Ok(normalize_task(&raw, now)?)
    }

    /// Approve a task awaiting review: `REVIEW -> COMPLETED`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the backend does not know the id
    /// - [`CoreError::InvalidTransition`] if the task is not in `REVIEW`
    /// - [`ApiError`] if the approve call itself fails
    pub async fn approve(&self, id: &str, now: DateTime<Utc>) -> Result<ApprovalOutcome, ServiceError> {
        let current = self.fetch_task(id, now).await?;
        let task = workflow::approve(&current, now)?;

        self.post_approve(id).await?;
        tracing::info!(id, "task approved");

        Ok(ApprovalOutcome {
            task,
            path: WorkflowPath::Direct,
            comment: None,
        })
    }

    /// Send a task back for rework: `REVIEW -> IN_PROGRESS`.
    ///
    /// If the reject endpoint fails for any reason, the status is set directly
    /// through `PATCH /api/tasks/:id/status`; only a failure there is returned.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the backend does not know the id
    /// - [`CoreError::InvalidTransition`] if the task is not in `REVIEW`
    /// - [`ApiError`] if both the reject call and the fallback fail
    pub async fn reject(
        &self,
        id: &str,
        comment: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ApprovalOutcome, ServiceError> {
        let current = self.fetch_task(id, now).await?;
        let task = workflow::reject(&current, now)?;
        let comment = comment.map(str::trim).filter(|c| !c.is_empty());

        let path = match self.post_reject(id, comment).await {
            Ok(_) => WorkflowPath::Direct,
            Err(err) => {
                tracing::warn!(
                    id,
                    status = ?err.status(),
                    error = %err,
                    "reject endpoint failed; falling back to status update"
                );
                self.reject_via_status(id).await?;
                WorkflowPath::StatusFallback
            }
        };
        tracing::info!(id, ?path, "task rejected");

        Ok(ApprovalOutcome {
            task,
            path,
            comment: comment.map(str::to_string),
        })
    }

    async fn reject_via_status(&self, id: &str) -> Result<(), ApiError> {
        self.patch_status(id, TaskStatus::InProgress).await.map(|_| ())
    }

    /// Explicit status change, checked against the state machine first.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the backend does not know the id
    /// - [`CoreError::InvalidTransition`] if the move is not allowed
    /// - [`ApiError`] if the status patch fails
    pub async fn change_status(
        &self,
        id: &str,
        next: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<Task, ServiceError> {
        let current = self.fetch_task(id, now).await?;
        let task = workflow::transition(&current, next, now)?;
        self.patch_status(id, next).await?;
        tracing::info!(id, from = %current.status, to = %next, "task status changed");
        Ok(task)
    }
}
