//! Shared fixtures for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::entities::{PersonRef, Schedule, Task};
use crate::enums::{Priority, TaskStatus};

/// Fixed evaluation instant used across tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn task(id: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: None,
        category: None,
        location: None,
        assignee: None,
        assigned_by: None,
        priority: Priority::Normal,
        status,
        raw_status: Some(status.wire_str().to_string()),
        due_date: None,
        schedule: Schedule::default(),
        completed_at: (status == TaskStatus::Completed).then(now),
        created_at: None,
        updated_at: None,
        estimated_minutes: None,
    }
}

pub fn assigned(mut task: Task, id: Option<&str>, name: Option<&str>) -> Task {
    task.assignee = Some(PersonRef {
        id: id.map(str::to_string),
        name: name.map(str::to_string),
    });
    task
}

pub fn due(mut task: Task, due: DateTime<Utc>) -> Task {
    task.due_date = Some(due);
    task
}
