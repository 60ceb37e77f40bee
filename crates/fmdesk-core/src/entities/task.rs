use chrono::{DateTime, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::PersonRef;
use crate::enums::{Priority, TaskStatus};

/// Planned execution window. Timestamps and clock-times are independent:
/// recurring tasks usually carry only clock-times.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Schedule {
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl Schedule {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_at.is_none()
            && self.end_at.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }
}

/// A unit of facility work in canonical form.
///
/// `completed_at` is `Some` exactly when `status` is `COMPLETED`. Overdue-ness
/// is not stored here; derive it with [`crate::overdue::is_overdue`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub assignee: Option<PersonRef>,
    pub assigned_by: Option<PersonRef>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Status string exactly as the backend sent it.
    pub raw_status: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Schedule::is_empty")]
    pub schedule: Schedule,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Estimated duration in whole minutes.
    pub estimated_minutes: Option<u32>,
}

impl Task {
    /// Assignee display name, or `"Unassigned"`.
    #[must_use]
    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .and_then(PersonRef::display)
            .unwrap_or("Unassigned")
    }

    /// Category display name, or `"General"`.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or("General")
    }

    /// Most recent meaningful timestamp: completion, then update, then creation.
    #[must_use]
    pub fn last_activity_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at.or(self.updated_at).or(self.created_at)
    }
}
