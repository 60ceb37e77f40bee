//! Raw task record → canonical [`Task`].
//!
//! Backend payloads differ between create and read routes, and between
//! deployments, so every field is looked up under a list of known keys and
//! the first usable value wins. Only a missing id rejects a record; every
//! other field degrades to `None` or a documented default.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::entities::{PersonRef, Schedule, Task};
use crate::enums::{Priority, TaskStatus};
use crate::errors::CoreError;
use crate::parse::{parse_clock_time, parse_duration_minutes, parse_timestamp, parse_timestamp_str};

const ID_KEYS: &[&str] = &["id", "_id", "taskId"];
const TITLE_KEYS: &[&str] = &["title", "name", "taskName"];
const DESCRIPTION_KEYS: &[&str] = &["description", "details", "notes"];
const CATEGORY_KEYS: &[&str] = &["category", "department", "taskType", "type"];
const STATUS_KEYS: &[&str] = &["status", "taskStatus", "state"];
const PRIORITY_KEYS: &[&str] = &["priority", "priorityLevel"];
const DUE_KEYS: &[&str] = &["dueDate", "due_date", "deadline", "dueAt"];
const DURATION_KEYS: &[&str] = &[
    "estimatedDuration",
    "duration",
    "estimatedMinutes",
    "estimate",
    "estimated_duration",
];
const COMPLETED_KEYS: &[&str] = &["completedAt", "completed_at", "completionDate"];
const CREATED_KEYS: &[&str] = &["createdAt", "created_at"];
const UPDATED_KEYS: &[&str] = &["updatedAt", "updated_at"];
const START_AT_KEYS: &[&str] = &["startedAt", "startDate", "startAt", "started_at"];
const END_AT_KEYS: &[&str] = &["endDate", "endAt", "end_date"];
const START_TIME_KEYS: &[&str] = &["startTime", "start_time"];
const END_TIME_KEYS: &[&str] = &["endTime", "end_time"];

const LOCATION_KEYS: &[&str] = &["location", "locationName", "area", "address"];
const FLOOR_KEYS: &[&str] = &["floor", "floorNumber", "floorName"];
const ROOM_KEYS: &[&str] = &["room", "roomNumber", "roomName", "unit"];

const PERSON_ID_KEYS: &[&str] = &["id", "_id", "userId"];
const PERSON_NAME_KEYS: &[&str] = &["name", "fullName", "displayName"];
const PERSON_FIRST_KEYS: &[&str] = &["firstName", "first_name"];
const PERSON_LAST_KEYS: &[&str] = &["lastName", "last_name"];

const ASSIGNEE_OBJECT_KEYS: &[&str] = &["assignee", "assignedTo", "assignedUser", "staff"];
const ASSIGNEE_ID_KEYS: &[&str] = &["assigneeId", "assignedToId", "assignedTo", "userId", "staffId"];
const ASSIGNEE_NAME_KEYS: &[&str] = &["assigneeName", "assignedToName", "staffName"];
const ASSIGNEE_FIRST_KEYS: &[&str] = &["assigneeFirstName", "assignedToFirstName"];
const ASSIGNEE_LAST_KEYS: &[&str] = &["assigneeLastName", "assignedToLastName"];

const ASSIGNER_OBJECT_KEYS: &[&str] = &["assignedBy", "createdBy"];
const ASSIGNER_ID_KEYS: &[&str] = &["assignedById", "createdById", "assignedBy", "createdBy"];
const ASSIGNER_NAME_KEYS: &[&str] = &["assignedByName", "createdByName"];

const UNTITLED: &str = "Untitled task";

/// Normalize one raw record.
///
/// `now` is only used as the last-resort completion time for a `COMPLETED`
/// record that carries no timestamps at all.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the record is not a JSON object or has
/// no usable id.
pub fn normalize_task(raw: &Value, now: DateTime<Utc>) -> Result<Task, CoreError> {
    let record = raw
        .as_object()
        .ok_or_else(|| CoreError::Validation("task record is not a JSON object".to_string()))?;
    let id = text(record, ID_KEYS)
        .ok_or_else(|| CoreError::Validation("task record has no id".to_string()))?;

    let raw_status = text(record, STATUS_KEYS);
    let status = raw_status
        .as_deref()
        .map_or(TaskStatus::ToDo, TaskStatus::normalize);

    let created_at = timestamp(record, CREATED_KEYS);
    let updated_at = timestamp(record, UPDATED_KEYS);
    let completed_at = if status == TaskStatus::Completed {
        Some(
            timestamp(record, COMPLETED_KEYS)
                .or(updated_at)
                .or(created_at)
                .unwrap_or(now),
        )
    } else {
        None
    };

    Ok(Task {
        id,
        title: text(record, TITLE_KEYS).unwrap_or_else(|| UNTITLED.to_string()),
        description: text(record, DESCRIPTION_KEYS),
        category: text(record, CATEGORY_KEYS),
        location: location(record),
        assignee: person(
            record,
            ASSIGNEE_OBJECT_KEYS,
            ASSIGNEE_ID_KEYS,
            ASSIGNEE_NAME_KEYS,
            Some((ASSIGNEE_FIRST_KEYS, ASSIGNEE_LAST_KEYS)),
        ),
        assigned_by: person(
            record,
            ASSIGNER_OBJECT_KEYS,
            ASSIGNER_ID_KEYS,
            ASSIGNER_NAME_KEYS,
            None,
        ),
        priority: text(record, PRIORITY_KEYS)
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or_default(),
        status,
        raw_status,
        due_date: timestamp(record, DUE_KEYS),
        schedule: schedule(record),
        completed_at,
        created_at,
        updated_at,
        estimated_minutes: DURATION_KEYS
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(parse_duration_minutes),
    })
}

/// Normalize a collection, skipping (and logging) records that cannot be used.
#[must_use]
pub fn normalize_tasks(raws: &[Value], now: DateTime<Utc>) -> Vec<Task> {
    raws.iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize_task(raw, now) {
            Ok(task) => Some(task),
            Err(error) => {
                tracing::warn!(index, %error, "skipping unusable task record");
                None
            }
        })
        .collect()
}

/// First non-blank scalar under any of `keys`, as a trimmed string.
fn text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(scalar_string)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn object<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(Value::as_object)
}

fn timestamp(record: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(parse_timestamp)
}

fn full_name(
    record: &Map<String, Value>,
    first_keys: &[&str],
    last_keys: &[&str],
) -> Option<String> {
    let parts = [text(record, first_keys), text(record, last_keys)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn person_from_object(record: &Map<String, Value>) -> Option<PersonRef> {
    let id = text(record, PERSON_ID_KEYS);
    let name = text(record, PERSON_NAME_KEYS)
        .or_else(|| full_name(record, PERSON_FIRST_KEYS, PERSON_LAST_KEYS));
    (id.is_some() || name.is_some()).then_some(PersonRef { id, name })
}

/// Coalesce a nested person object with flat id/name fields. Nested values win.
fn person(
    record: &Map<String, Value>,
    object_keys: &[&str],
    id_keys: &[&str],
    name_keys: &[&str],
    split_name_keys: Option<(&[&str], &[&str])>,
) -> Option<PersonRef> {
    let nested = object(record, object_keys).and_then(person_from_object);
    let flat_id = text(record, id_keys);
    let flat_name = text(record, name_keys).or_else(|| {
        split_name_keys.and_then(|(first, last)| full_name(record, first, last))
    });

    let id = nested.as_ref().and_then(|p| p.id.clone()).or(flat_id);
    let name = nested.and_then(|p| p.name).or(flat_name);
    (id.is_some() || name.is_some()).then_some(PersonRef { id, name })
}

fn floor_room(record: &Map<String, Value>) -> Option<String> {
    let floor = text(record, FLOOR_KEYS).map(|floor| prefixed("Floor", floor));
    let room = text(record, ROOM_KEYS).map(|room| prefixed("Room", room));
    let parts = [floor, room].into_iter().flatten().collect::<Vec<_>>();
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn prefixed(prefix: &str, value: String) -> String {
    if value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    {
        value
    } else {
        format!("{prefix} {value}")
    }
}

fn location(record: &Map<String, Value>) -> Option<String> {
    text(record, LOCATION_KEYS)
        .or_else(|| {
            object(record, LOCATION_KEYS).and_then(|nested| {
                text(nested, &["name", "label"]).or_else(|| floor_room(nested))
            })
        })
        .or_else(|| floor_room(record))
}

/// Clock-time fields sometimes carry full timestamps; those fill the
/// timestamp half of the schedule instead.
fn schedule(record: &Map<String, Value>) -> Schedule {
    let mut schedule = Schedule {
        start_at: timestamp(record, START_AT_KEYS),
        end_at: timestamp(record, END_AT_KEYS),
        ..Schedule::default()
    };

    if let Some(raw) = text(record, START_TIME_KEYS) {
        match parse_clock_time(&raw) {
            Some(time) => schedule.start_time = Some(time),
            None => {
                schedule.start_at = schedule
                    .start_at
                    .or_else(|| parse_timestamp_str(&raw));
            }
        }
    }
    if let Some(raw) = text(record, END_TIME_KEYS) {
        match parse_clock_time(&raw) {
            Some(time) => schedule.end_time = Some(time),
            None => {
                schedule.end_at = schedule
                    .end_at
                    .or_else(|| parse_timestamp_str(&raw));
            }
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn read_payload_normalizes_every_field() {
        let raw = json!({
            "_id": "t-1",
            "title": "Replace lobby bulbs",
            "description": "All six fixtures",
            "department": "Electrical",
            "floor": "2",
            "room": "204",
            "assignee": {"_id": "u-9", "firstName": "Dana", "lastName": "Reyes"},
            "assignedBy": {"id": "u-1", "name": "Sam Ortiz"},
            "priority": "high",
            "status": "Pending Approval",
            "dueDate": "2024-06-02T09:00:00Z",
            "startTime": "08:30",
            "endTime": "10:00",
            "createdAt": "2024-05-30T08:00:00Z",
            "updatedAt": "2024-05-31T08:00:00Z",
            "estimatedDuration": "1h 30m"
        });

        let task = normalize_task(&raw, now()).unwrap();
        assert_eq!(task.id, "t-1");
        assert_eq!(task.category.as_deref(), Some("Electrical"));
        assert_eq!(task.location.as_deref(), Some("Floor 2 · Room 204"));
        assert_eq!(
            task.assignee,
            Some(PersonRef {
                id: Some("u-9".into()),
                name: Some("Dana Reyes".into()),
            })
        );
        assert_eq!(task.assigned_by.and_then(|p| p.name).as_deref(), Some("Sam Ortiz"));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::Review);
        assert_eq!(task.raw_status.as_deref(), Some("Pending Approval"));
        assert_eq!(
            task.due_date,
            Some(Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap())
        );
        assert_eq!(task.schedule.start_time, NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(task.schedule.end_time, NaiveTime::from_hms_opt(10, 0, 0));
        assert_eq!(task.estimated_minutes, Some(90));
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn create_payload_aliases_are_tolerated() {
        let raw = json!({
            "id": 42,
            "name": "Inspect boiler",
            "taskType": "HVAC",
            "locationName": "Basement",
            "assignedTo": "u-3",
            "assigneeName": "Lee",
            "priority": "URGENT",
            "deadline": "2024-06-03",
            "duration": 45
        });

        let task = normalize_task(&raw, now()).unwrap();
        assert_eq!(task.id, "42");
        assert_eq!(task.title, "Inspect boiler");
        assert_eq!(task.category.as_deref(), Some("HVAC"));
        assert_eq!(task.location.as_deref(), Some("Basement"));
        assert_eq!(task.assignee_name(), "Lee");
        assert_eq!(task.assignee.and_then(|p| p.id).as_deref(), Some("u-3"));
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.raw_status, None);
        assert_eq!(task.estimated_minutes, Some(45));
    }

    #[test]
    fn flat_split_assignee_name_is_joined() {
        let raw = json!({
            "id": "t-2",
            "assigneeFirstName": "Ana",
            "assigneeLastName": "Lima"
        });
        let task = normalize_task(&raw, now()).unwrap();
        assert_eq!(task.assignee_name(), "Ana Lima");
        assert_eq!(task.assignee.and_then(|p| p.id), None);
    }

    #[test]
    fn nested_location_object() {
        let raw = json!({"id": "t-3", "location": {"floor": "Floor 3", "room": "B"}});
        let task = normalize_task(&raw, now()).unwrap();
        assert_eq!(task.location.as_deref(), Some("Floor 3 · Room B"));
    }

    #[test]
    fn unassigned_when_no_assignee_fields() {
        let task = normalize_task(&json!({"id": "t-4", "title": "x"}), now()).unwrap();
        assert_eq!(task.assignee, None);
        assert_eq!(task.assignee_name(), "Unassigned");
        assert_eq!(task.priority, Priority::Normal);
    }

    #[test]
    fn completed_at_only_kept_for_completed_tasks() {
        let raw = json!({
            "id": "t-5",
            "status": "in_progress",
            "completedAt": "2024-05-31T08:00:00Z"
        });
        assert_eq!(normalize_task(&raw, now()).unwrap().completed_at, None);

        let raw = json!({
            "id": "t-6",
            "status": "done",
            "updatedAt": "2024-05-31T08:00:00Z"
        });
        let task = normalize_task(&raw, now()).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(
            task.completed_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 31, 8, 0, 0).unwrap())
        );

        let raw = json!({"id": "t-7", "status": "approved"});
        assert_eq!(normalize_task(&raw, now()).unwrap().completed_at, Some(now()));
    }

    #[test]
    fn unknown_status_and_bad_fields_degrade_quietly() {
        let raw = json!({
            "id": "t-8",
            "status": "archived",
            "dueDate": "someday",
            "estimatedDuration": "garbled",
            "priority": "whenever"
        });
        let task = normalize_task(&raw, now()).unwrap();
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.raw_status.as_deref(), Some("archived"));
        assert_eq!(task.due_date, None);
        assert_eq!(task.estimated_minutes, None);
        assert_eq!(task.priority, Priority::Normal);
    }

    #[test]
    fn timestamp_in_start_time_fills_start_at() {
        let raw = json!({"id": "t-9", "startTime": "2024-06-01T10:00:00Z"});
        let task = normalize_task(&raw, now()).unwrap();
        assert_eq!(task.schedule.start_time, None);
        assert_eq!(
            task.schedule.start_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn records_without_id_are_rejected() {
        assert!(matches!(
            normalize_task(&json!({"title": "orphan"}), now()),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            normalize_task(&json!(["not", "an", "object"]), now()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn collection_skips_unusable_records() {
        let raws = vec![json!({"id": "a"}), json!("junk"), json!({"id": "b"})];
        let tasks = normalize_tasks(&raws, now());
        let ids = tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
