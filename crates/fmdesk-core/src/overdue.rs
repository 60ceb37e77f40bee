//! Overdue derivation and elapsed-time progress.
//!
//! Both are functions of `now` and must be re-evaluated on every render or
//! poll; neither result is ever stored on a [`Task`].

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::parse::format_duration;

/// Estimate used for progress when a task carries none.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 120;

/// A task is overdue iff it has a due date strictly before `now` and is still
/// `TO_DO` or `IN_PROGRESS`.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.status.is_open() && task.due_date.is_some_and(|due| due < now)
}

/// Elapsed time against the estimate, e.g. `"2h 15m / 3h"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ElapsedProgress {
    pub elapsed_minutes: u32,
    pub estimate_minutes: u32,
    /// `min(100, elapsed / estimate × 100)`, floored.
    pub percent: u8,
    /// Elapsed time exceeds the estimate.
    pub overrun: bool,
}

impl ElapsedProgress {
    /// Progress of work started at `started_at`. A start in the future counts as zero elapsed.
    #[must_use]
    pub fn compute(started_at: DateTime<Utc>, now: DateTime<Utc>, estimate_minutes: u32) -> Self {
        let elapsed_minutes = u32::try_from((now - started_at).num_minutes().max(0)).unwrap_or(u32::MAX);
        let percent = (u64::from(elapsed_minutes) * 100 / u64::from(estimate_minutes.max(1))).min(100);
        Self {
            elapsed_minutes,
            estimate_minutes,
            percent: u8::try_from(percent).unwrap_or(100),
            overrun: elapsed_minutes > estimate_minutes,
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} / {}",
            format_duration(self.elapsed_minutes),
            format_duration(self.estimate_minutes)
        )
    }
}

/// Progress for a started task, falling back to `fallback_estimate` minutes
/// when the task has no (or a zero) estimate. `None` if the task has not started.
#[must_use]
pub fn elapsed_progress(
    task: &Task,
    now: DateTime<Utc>,
    fallback_estimate: u32,
) -> Option<ElapsedProgress> {
    let started_at = task.schedule.start_at?;
    let estimate = task
        .estimated_minutes
        .filter(|minutes| *minutes > 0)
        .unwrap_or(fallback_estimate);
    Some(ElapsedProgress::compute(started_at, now, estimate))
}
