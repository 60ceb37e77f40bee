//! Serde roundtrip and JsonSchema validation tests for the public data types.

use chrono::{NaiveTime, TimeZone, Utc};
use fmdesk_core::activity::{ActivityEvent, ActivityKind};
use fmdesk_core::aggregates::{AssigneePerformance, StatusCount, TaskStats};
use fmdesk_core::entities::*;
use fmdesk_core::enums::*;
use fmdesk_core::normalize::normalize_task;
use fmdesk_core::overdue::ElapsedProgress;
use fmdesk_core::requests::{TaskDraft, TaskUpdate};
use fmdesk_core::views::{Dashboard, DashboardOptions};
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_task() -> Task {
    Task {
        id: "task-42".into(),
        title: "Replace lobby light fixture".into(),
        description: Some("Flickering since Monday".into()),
        category: Some("Electrical".into()),
        location: Some("Floor 2 · Room 204".into()),
        assignee: Some(PersonRef {
            id: Some("u-7".into()),
            name: Some("Ana Reyes".into()),
        }),
        assigned_by: Some(PersonRef {
            id: None,
            name: Some("Facilities Desk".into()),
        }),
        priority: Priority::High,
        status: TaskStatus::InProgress,
        raw_status: Some("In Progress".into()),
        due_date: Some(Utc.with_ymd_and_hms(2024, 6, 3, 17, 0, 0).unwrap()),
        schedule: Schedule {
            start_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()),
            end_at: None,
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(11, 30, 0),
        },
        completed_at: None,
        created_at: Some(Utc.with_ymd_and_hms(2024, 5, 30, 8, 15, 0).unwrap()),
        updated_at: Some(Utc::now()),
        estimated_minutes: Some(150),
    }
}

roundtrip_and_validate!(task_roundtrip, Task, sample_task());

roundtrip_and_validate!(
    person_ref_roundtrip,
    PersonRef,
    PersonRef {
        id: Some("u-1".into()),
        name: None,
    }
);

roundtrip_and_validate!(
    task_stats_roundtrip,
    TaskStats,
    TaskStats {
        total: 10,
        completed: 4,
        pending: 4,
        pending_approval: 2,
        overdue: 1,
        completed_pct: 40,
    }
);

roundtrip_and_validate!(
    assignee_performance_roundtrip,
    AssigneePerformance,
    AssigneePerformance {
        key: "u-7".into(),
        name: "Ana Reyes".into(),
        total: 3,
        completed: 2,
        completion_pct: 67,
    }
);

roundtrip_and_validate!(
    status_count_roundtrip,
    StatusCount,
    StatusCount {
        status: TaskStatus::Review,
        count: 2,
    }
);

roundtrip_and_validate!(
    activity_event_roundtrip,
    ActivityEvent,
    ActivityEvent {
        task_id: "task-42".into(),
        kind: ActivityKind::PendingApproval,
        message: "Ana Reyes submitted \"Replace lobby light fixture\" for approval".into(),
        at: Utc::now(),
        time_label: "Just now".into(),
    }
);

roundtrip_and_validate!(
    elapsed_progress_roundtrip,
    ElapsedProgress,
    ElapsedProgress {
        elapsed_minutes: 135,
        estimate_minutes: 180,
        percent: 75,
        overrun: false,
    }
);

roundtrip_and_validate!(
    task_draft_roundtrip,
    TaskDraft,
    TaskDraft {
        category: Some("Cleaning".into()),
        assignee_id: Some("u-3".into()),
        priority: Priority::Urgent,
        due_date: Some(Utc::now()),
        estimated_duration: Some(45),
        ..TaskDraft::new("Deep clean kitchen")
    }
);

roundtrip_and_validate!(
    task_update_roundtrip,
    TaskUpdate,
    TaskUpdate {
        title: Some("Deep clean kitchen and pantry".into()),
        location: Some(Some("Ground floor".into())),
        description: Some(None),
        assignee_id: Some(None),
        priority: Some(Priority::Low),
        start_time: NaiveTime::from_hms_opt(7, 30, 0),
        ..TaskUpdate::default()
    }
);

roundtrip_and_validate!(
    dashboard_roundtrip,
    Dashboard,
    Dashboard::build(
        &[sample_task()],
        Role::Supervisor,
        Utc.with_ymd_and_hms(2024, 6, 4, 12, 0, 0).unwrap(),
        DashboardOptions::default(),
    )
);

#[test]
fn status_serializes_screaming_snake() {
    assert_eq!(
        serde_json::to_value(TaskStatus::InProgress).unwrap(),
        json!("IN_PROGRESS")
    );
    assert_eq!(serde_json::to_value(Role::Supervisor).unwrap(), json!("supervisor"));
}

#[test]
fn normalized_task_satisfies_schema() {
    let raw = json!({
        "_id": "65f0c1",
        "taskName": "Check fire extinguishers",
        "status": "Pending Approval",
        "priority": "urgent",
        "assignedTo": {"firstName": "Ben", "lastName": "Okafor", "_id": "u-9"},
        "floor": "3",
        "room": "301",
        "estimatedDuration": "1h 30m",
        "dueDate": "2024-06-05T10:00:00Z"
    });
    let task = normalize_task(&raw, Utc::now()).unwrap();

    let schema = serde_json::to_value(schema_for!(Task)).unwrap();
    let instance = serde_json::to_value(&task).unwrap();
    assert!(validate_against_schema(&schema, &instance).is_empty());
    assert_eq!(task.status, TaskStatus::Review);
    assert_eq!(task.estimated_minutes, Some(90));
}

#[test]
fn empty_schedule_is_omitted_and_restored() {
    let task = Task {
        schedule: Schedule::default(),
        ..sample_task()
    };
    let value = serde_json::to_value(&task).unwrap();
    assert!(value.get("schedule").is_none());

    let back: Task = serde_json::from_value(value).unwrap();
    assert_eq!(back, task);
}
