//! Approval workflow and explicit status transition rules.
//!
//! These functions only decide what the next canonical state is; sending the
//! change to the backend (including the reject fallback) is the job of
//! `fmdesk-client`. Inputs are never mutated.

use chrono::{DateTime, Utc};

use crate::entities::Task;
use crate::enums::TaskStatus;
use crate::errors::CoreError;

fn invalid_transition(task: &Task, to: TaskStatus) -> CoreError {
    CoreError::InvalidTransition {
        entity_type: "task".to_string(),
        id: task.id.clone(),
        from: task.status.to_string(),
        to: to.to_string(),
    }
}

/// Apply `next` to a copy of `task`, keeping `completed_at` consistent with
/// the new status.
fn apply(task: &Task, next: TaskStatus, now: DateTime<Utc>) -> Task {
    let mut updated = task.clone();
    updated.status = next;
    updated.raw_status = Some(next.wire_str().to_string());
    updated.updated_at = Some(now);
    updated.completed_at = (next == TaskStatus::Completed).then_some(now);
    updated
}

/// Check that an approval action (approve or reject) may run on `task`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTransition`] unless the task is in `REVIEW`.
pub fn ensure_awaiting_approval(task: &Task, action: TaskStatus) -> Result<(), CoreError> {
    if task.status == TaskStatus::Review {
        Ok(())
    } else {
        Err(invalid_transition(task, action))
    }
}

/// `REVIEW → COMPLETED`, stamping `completed_at` with the approval time.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTransition`] if the task is not in `REVIEW`.
pub fn approve(task: &Task, now: DateTime<Utc>) -> Result<Task, CoreError> {
    ensure_awaiting_approval(task, TaskStatus::Completed)?;
    Ok(apply(task, TaskStatus::Completed, now))
}

/// `REVIEW → IN_PROGRESS`: send the work back for rework.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTransition`] if the task is not in `REVIEW`.
pub fn reject(task: &Task, now: DateTime<Utc>) -> Result<Task, CoreError> {
    ensure_awaiting_approval(task, TaskStatus::InProgress)?;
    Ok(apply(task, TaskStatus::InProgress, now))
}

/// Generic explicit transition, checked against [`TaskStatus::allowed_next_states`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidTransition`] if the state machine forbids the move.
pub fn transition(task: &Task, next: TaskStatus, now: DateTime<Utc>) -> Result<Task, CoreError> {
    if !task.status.can_transition_to(next) {
        return Err(invalid_transition(task, next));
    }
    Ok(apply(task, next, now))
}

/// Require a non-blank rejection comment.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the comment is missing or blank.
pub fn require_comment(comment: Option<&str>) -> Result<&str, CoreError> {
    comment
        .map(str::trim)
        .filter(|comment| !comment.is_empty())
        .ok_or_else(|| CoreError::Validation("a comment is required to reject a task".to_string()))
}
