//! Request payloads: task drafts, partial updates, and list filters.
//!
//! Drafts and updates serialize to the backend's camelCase field names and
//! are validated locally, so a bad form never reaches the network.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::Task;
use crate::enums::{Priority, TaskStatus};
use crate::errors::CoreError;

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title is required".to_string()));
    }
    Ok(())
}

fn validate_estimate(estimate: Option<u32>) -> Result<(), CoreError> {
    if estimate == Some(0) {
        return Err(CoreError::Validation(
            "estimated duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TaskDraft
// ---------------------------------------------------------------------------

/// Payload for `POST /api/tasks`. New tasks always start in `TO_DO`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
}

impl TaskDraft {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Status every new task is created in.
    #[must_use]
    pub const fn initial_status() -> TaskStatus {
        TaskStatus::ToDo
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a blank title or a zero estimate.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_estimate(self.estimated_duration)
    }
}

// ---------------------------------------------------------------------------
// TaskUpdate
// ---------------------------------------------------------------------------

/// Present-but-null becomes `Some(None)`; an absent key stays `None` via `default`.
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial edit for `PUT /api/tasks/:id`. `Some(None)` clears a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.location.is_none()
            && self.assignee_id.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.estimated_duration.is_none()
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for an empty update, a blank title, or
    /// a zero estimate.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation("update has no fields".to_string()));
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_estimate(self.estimated_duration)
    }
}

#[derive(Debug, Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: Option<String>) -> Self {
        self.0.location = Some(location);
        self
    }

    /// Reassign the task; `None` unassigns it.
    #[must_use]
    pub fn assignee_id(mut self, assignee_id: Option<String>) -> Self {
        self.0.assignee_id = Some(assignee_id);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub const fn schedule(mut self, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        self.0.start_time = Some(start_time);
        self.0.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub const fn estimated_duration(mut self, minutes: u32) -> Self {
        self.0.estimated_duration = Some(minutes);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

// ---------------------------------------------------------------------------
// TaskFilter
// ---------------------------------------------------------------------------

/// Filters for `GET /api/tasks`.
///
/// Sent as query parameters and re-applied locally after normalization,
/// since not every backend honours them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl TaskFilter {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
    }

    /// Query parameters in wire form, in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.wire_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(assignee_id) = &self.assignee_id {
            pairs.push(("assigneeId", assignee_id.clone()));
        }
        if let Some(due_date) = self.due_date {
            pairs.push(("dueDate", due_date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }

    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status == status)
            && self.priority.is_none_or(|priority| task.priority == priority)
            && self.assignee_id.as_deref().is_none_or(|wanted| {
                task.assignee
                    .as_ref()
                    .and_then(|person| person.id.as_deref())
                    == Some(wanted)
            })
            && self
                .due_date
                .is_none_or(|day| task.due_date.is_some_and(|due| due.date_naive() == day))
    }
}
