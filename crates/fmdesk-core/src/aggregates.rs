//! Dashboard aggregates over a task collection.
//!
//! Pure functions of `(tasks, now)`, shared by every role's dashboard.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::enums::TaskStatus;
use crate::overdue::is_overdue;

/// Bucket key for tasks with neither an assignee id nor a name.
pub const UNASSIGNED_KEY: &str = "unassigned";

/// Headline counts for a dashboard.
///
/// `pending = total − completed − pending_approval`. Overdue tasks are a
/// subset of pending and are reported alongside it, not subtracted from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub pending_approval: usize,
    pub overdue: usize,
    /// Rounded completion percentage in `0..=100`; `0` for an empty collection.
    pub completed_pct: u8,
}

/// Completion figures for one assignee bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssigneePerformance {
    /// Assignee id, else display name, else [`UNASSIGNED_KEY`].
    pub key: String,
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub completion_pct: u8,
}

/// Task count for one canonical status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: usize,
}

/// `round(part / total × 100)`, or `0` when `total` is zero.
#[must_use]
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total);
    // Integer form of round-half-up: floor(100·part/total + ½).
    let pct = (part * 200 + total) / (total * 2);
    u8::try_from(pct.min(100)).unwrap_or(100)
}

#[must_use]
pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let total = tasks.len();
    let completed = count_status(tasks, TaskStatus::Completed);
    let pending_approval = count_status(tasks, TaskStatus::Review);
    let overdue = tasks.iter().filter(|task| is_overdue(task, now)).count();

    TaskStats {
        total,
        completed,
        pending: total - completed - pending_approval,
        pending_approval,
        overdue,
        completed_pct: percentage(completed, total),
    }
}

fn count_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status == status).count()
}

/// Group key and display name for a task's assignee bucket.
fn assignee_bucket(task: &Task) -> (String, String) {
    let assignee = task.assignee.as_ref();
    let id = assignee.and_then(|person| person.id.clone());
    let name = assignee.and_then(|person| person.name.clone());
    match (id, name) {
        (Some(id), Some(name)) => (id, name),
        (Some(id), None) => (id.clone(), id),
        (None, Some(name)) => (name.clone(), name),
        (None, None) => (UNASSIGNED_KEY.to_string(), "Unassigned".to_string()),
    }
}

/// Per-assignee completion, ordered by completion %, then volume, then key.
#[must_use]
pub fn assignee_performance(tasks: &[Task]) -> Vec<AssigneePerformance> {
    let mut buckets: HashMap<String, AssigneePerformance> = HashMap::new();

    for task in tasks {
        let (key, name) = assignee_bucket(task);
        let entry = buckets
            .entry(key.clone())
            .or_insert_with(|| AssigneePerformance {
                key,
                name,
                total: 0,
                completed: 0,
                completion_pct: 0,
            });
        entry.total += 1;
        if task.status == TaskStatus::Completed {
            entry.completed += 1;
        }
    }

    let mut rows = buckets
        .into_values()
        .map(|mut row| {
            row.completion_pct = percentage(row.completed, row.total);
            row
        })
        .collect::<Vec<_>>();
    rows.sort_by(|left, right| {
        right
            .completion_pct
            .cmp(&left.completion_pct)
            .then_with(|| right.total.cmp(&left.total))
            .then_with(|| left.key.cmp(&right.key))
    });
    rows
}

/// Count per canonical status, in lifecycle order, including zero rows.
#[must_use]
pub fn status_histogram(tasks: &[Task]) -> Vec<StatusCount> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: count_status(tasks, status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assigned, due, now, task};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_collection_is_all_zero() {
        assert_eq!(compute_stats(&[], now()), TaskStats::default());
        assert!(assignee_performance(&[]).is_empty());
    }

    #[test]
    fn ten_task_scenario() {
        let yesterday = now() - Duration::days(1);
        let mut tasks = Vec::new();
        for i in 0..4 {
            tasks.push(task(&format!("c{i}"), TaskStatus::Completed));
        }
        for i in 0..2 {
            tasks.push(task(&format!("r{i}"), TaskStatus::Review));
        }
        tasks.push(due(task("p0", TaskStatus::InProgress), yesterday));
        for i in 0..3 {
            tasks.push(task(&format!("t{i}"), TaskStatus::ToDo));
        }

        let stats = compute_stats(&tasks, now());
        assert_eq!(
            stats,
            TaskStats {
                total: 10,
                completed: 4,
                pending: 4,
                pending_approval: 2,
                overdue: 1,
                completed_pct: 40,
            }
        );
    }

    #[test]
    fn pending_identity_holds_with_cancelled_tasks() {
        let tasks = vec![
            task("a", TaskStatus::Cancelled),
            task("b", TaskStatus::Completed),
            task("c", TaskStatus::Review),
        ];
        let stats = compute_stats(&tasks, now());
        assert_eq!(stats.pending, stats.total - stats.completed - stats.pending_approval);
        assert_eq!(stats.pending, 1);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 3, 0)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 2, 50)]
    #[case(1, 8, 13)]
    #[case(3, 3, 100)]
    fn percentage_rounds_and_guards_zero(
        #[case] part: usize,
        #[case] total: usize,
        #[case] expected: u8,
    ) {
        assert_eq!(percentage(part, total), expected);
    }

    #[test]
    fn performance_groups_by_id_then_name_then_unassigned() {
        let tasks = vec![
            assigned(task("1", TaskStatus::Completed), Some("u1"), Some("Ana")),
            assigned(task("2", TaskStatus::ToDo), Some("u1"), Some("Ana")),
            assigned(task("3", TaskStatus::Completed), None, Some("Ben")),
            task("4", TaskStatus::ToDo),
            task("5", TaskStatus::ToDo),
        ];

        let rows = assignee_performance(&tasks);
        let summary = rows
            .iter()
            .map(|row| (row.key.as_str(), row.total, row.completed, row.completion_pct))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("Ben", 1, 1, 100),
                ("u1", 2, 1, 50),
                (UNASSIGNED_KEY, 2, 0, 0),
            ]
        );
        assert_eq!(rows[1].name, "Ana");
    }

    #[test]
    fn histogram_covers_every_status() {
        let tasks = vec![task("a", TaskStatus::Review), task("b", TaskStatus::Review)];
        let histogram = status_histogram(&tasks);
        assert_eq!(histogram.len(), TaskStatus::ALL.len());
        assert_eq!(
            histogram
                .iter()
                .find(|row| row.status == TaskStatus::Review)
                .map(|row| row.count),
            Some(2)
        );
        assert_eq!(histogram.iter().map(|row| row.count).sum::<usize>(), 2);
    }
}
