//! Role-specific projections of canonical tasks.
//!
//! A view is rebuilt from scratch on every render; nothing here is cached.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityEvent, DEFAULT_ACTIVITY_LIMIT, recent_activity};
use crate::aggregates::{
    AssigneePerformance, StatusCount, TaskStats, assignee_performance, compute_stats,
    status_histogram,
};
use crate::entities::Task;
use crate::enums::{Priority, Role, TaskStatus};
use crate::overdue::{DEFAULT_ESTIMATE_MINUTES, elapsed_progress, is_overdue};

/// One row of a task list as a given role sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub assignee: String,
    pub category: String,
    pub location: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Role label, or `"Overdue"` for an open task past its due date.
    pub status_label: String,
    pub overdue: bool,
    pub due_date: Option<DateTime<Utc>>,
    /// Elapsed-against-estimate label for started tasks.
    pub progress: Option<String>,
}

impl TaskView {
    #[must_use]
    pub fn project(task: &Task, role: Role, now: DateTime<Utc>, fallback_estimate: u32) -> Self {
        let overdue = is_overdue(task, now);
        let progress = if task.status.is_open() {
            elapsed_progress(task, now, fallback_estimate).map(|progress| progress.label())
        } else {
            None
        };

        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            assignee: task.assignee_name().to_string(),
            category: task.category_name().to_string(),
            location: task.location.clone(),
            priority: task.priority,
            status: task.status,
            status_label: role.display_label(task.status, overdue).to_string(),
            overdue,
            due_date: task.due_date,
            progress,
        }
    }

    #[must_use]
    pub fn project_all(
        tasks: &[Task],
        role: Role,
        now: DateTime<Utc>,
        fallback_estimate: u32,
    ) -> Vec<Self> {
        tasks
            .iter()
            .map(|task| Self::project(task, role, now, fallback_estimate))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub activity_limit: usize,
    pub default_estimate_minutes: u32,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
            default_estimate_minutes: DEFAULT_ESTIMATE_MINUTES,
        }
    }
}

/// Everything a role dashboard shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Dashboard {
    pub role: Role,
    pub generated_at: DateTime<Utc>,
    pub stats: TaskStats,
    pub performance: Vec<AssigneePerformance>,
    pub histogram: Vec<StatusCount>,
    pub activity: Vec<ActivityEvent>,
    /// Tasks awaiting approval, for the supervisor and manager queues.
    pub awaiting_approval: Vec<TaskView>,
}

impl Dashboard {
    #[must_use]
    pub fn build(tasks: &[Task], role: Role, now: DateTime<Utc>, options: DashboardOptions) -> Self {
        let awaiting_approval = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Review)
            .map(|task| TaskView::project(task, role, now, options.default_estimate_minutes))
            .collect();

        Self {
            role,
            generated_at: now,
            stats: compute_stats(tasks, now),
            performance: assignee_performance(tasks),
            histogram: status_histogram(tasks),
            activity: recent_activity(tasks, role, now, options.activity_limit),
            awaiting_approval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assigned, due, now, task};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Staff, "Submitted")]
    #[case(Role::Supervisor, "For Verification")]
    #[case(Role::Manager, "Pending Approval")]
    #[case(Role::Board, "Review")]
    fn review_label_per_role(#[case] role: Role, #[case] expected: &str) {
        let view = TaskView::project(&task("t", TaskStatus::Review), role, now(), 120);
        assert_eq!(view.status_label, expected);
        assert!(!view.overdue);
    }

    #[test]
    fn overdue_overrides_label_but_not_status() {
        let late = due(task("t", TaskStatus::InProgress), now() - Duration::hours(3));
        let view = TaskView::project(&late, Role::Manager, now(), 120);
        assert!(view.overdue);
        assert_eq!(view.status, TaskStatus::InProgress);
        assert_eq!(view.status_label, "Overdue");
    }

    #[test]
    fn progress_only_for_started_open_tasks() {
        let mut running = task("r", TaskStatus::InProgress);
        running.schedule.start_at = Some(now() - Duration::minutes(45));
        let view = TaskView::project(&running, Role::Staff, now(), 60);
        assert_eq!(view.progress.as_deref(), Some("45m / 1h"));

        let mut done = running.clone();
        done.status = TaskStatus::Completed;
        assert_eq!(TaskView::project(&done, Role::Staff, now(), 60).progress, None);
    }

    #[test]
    fn dashboard_collects_every_aggregate() {
        let mut review = assigned(task("r", TaskStatus::Review), Some("u1"), Some("Ana"));
        review.updated_at = Some(now() - Duration::minutes(2));
        let tasks = vec![review, task("c", TaskStatus::Completed), task("t", TaskStatus::ToDo)];

        let dashboard = Dashboard::build(&tasks, Role::Manager, now(), DashboardOptions::default());
        assert_eq!(dashboard.stats.total, 3);
        assert_eq!(dashboard.stats.completed_pct, 33);
        assert_eq!(dashboard.histogram.len(), 5);
        assert_eq!(dashboard.activity.len(), 2);
        assert_eq!(dashboard.activity[0].task_id, "c");
        assert_eq!(dashboard.awaiting_approval.len(), 1);
        assert_eq!(dashboard.awaiting_approval[0].assignee, "Ana");
    }

    #[test]
    fn dashboard_respects_activity_limit() {
        let tasks = (0..5)
            .map(|i| {
                let mut t = task(&format!("t{i}"), TaskStatus::ToDo);
                t.created_at = Some(now() - Duration::minutes(i));
                t
            })
            .collect::<Vec<_>>();
        let options = DashboardOptions {
            activity_limit: 2,
            ..DashboardOptions::default()
        };
        let dashboard = Dashboard::build(&tasks, Role::Board, now(), options);
        assert_eq!(dashboard.activity.len(), 2);
        assert_eq!(dashboard.activity[0].task_id, "t0");
    }
}
