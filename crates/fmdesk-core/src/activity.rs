//! Recent-activity feed derived from a task collection.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::enums::{Role, TaskStatus};
use crate::overdue::is_overdue;

/// Feed length used when the caller has no preference.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PendingApproval,
    Completed,
    Overdue,
    Updated,
}

impl ActivityKind {
    /// Classify a task. Earlier rules win: review, completed, overdue, updated.
    #[must_use]
    pub fn classify(task: &Task, now: DateTime<Utc>) -> Self {
        match task.status {
            TaskStatus::Review => Self::PendingApproval,
            TaskStatus::Completed => Self::Completed,
            _ if is_overdue(task, now) => Self::Overdue,
            _ => Self::Updated,
        }
    }
}

/// One human-readable line in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActivityEvent {
    pub task_id: String,
    pub kind: ActivityKind,
    pub message: String,
    pub at: DateTime<Utc>,
    /// `"Just now"`, `"5m ago"`, `"2h ago"`, `"3d ago"`, relative to render time.
    pub time_label: String,
}

/// Relative label for `at` as seen from `now`. Future instants read "Just now".
#[must_use]
pub fn relative_time_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}

fn message(task: &Task, kind: ActivityKind, role: Role) -> String {
    match kind {
        ActivityKind::PendingApproval => format!(
            "{} submitted \"{}\" for approval",
            task.assignee_name(),
            task.title
        ),
        ActivityKind::Completed => format!("\"{}\" completed by {}", task.title, task.assignee_name()),
        ActivityKind::Overdue => format!(
            "\"{}\" is overdue ({})",
            task.title,
            task.assignee_name()
        ),
        ActivityKind::Updated => format!(
            "{} task \"{}\" is {}",
            task.category_name(),
            task.title,
            role.status_label(task.status)
        ),
    }
}

/// The `limit` most recent events, newest first.
///
/// Each task is keyed by `completed_at ?? updated_at ?? created_at`; tasks with
/// none of these are left out. Ties break on task id.
#[must_use]
pub fn recent_activity(
    tasks: &[Task],
    role: Role,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<ActivityEvent> {
    let mut keyed = tasks
        .iter()
        .filter_map(|task| task.last_activity_at().map(|at| (at, task)))
        .collect::<Vec<_>>();
    keyed.sort_by(|(left_at, left), (right_at, right)| {
        right_at.cmp(left_at).then_with(|| left.id.cmp(&right.id))
    });

    keyed
        .into_iter()
        .take(limit)
        .map(|(at, task)| {
            let kind = ActivityKind::classify(task, now);
            ActivityEvent {
                task_id: task.id.clone(),
                kind,
                message: message(task, kind, role),
                at,
                time_label: relative_time_label(at, now),
            }
        })
        .collect()
}
