//! Status vocabulary, priorities, and role display tables.
//!
//! [`TaskStatus`] is the single canonical state used everywhere internally.
//! Raw backend strings enter through [`TaskStatus::normalize`]; role-facing
//! labels leave through [`Role::display_label`]. Labels never map back.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Canonical status of a task.
///
/// ```text
/// to_do → in_progress → review → completed
///   │          │          └──(reject)──→ in_progress
///   └──────────┴──→ cancelled → to_do (reopen)
/// ```
///
/// `OVERDUE` is not a status: it is derived from the due date on top of
/// `to_do` / `in_progress` (see [`crate::overdue`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Review,
    Completed,
    Cancelled,
}

/// Raw status aliases, keyed by their canonical form (upper-case, `_`-joined).
const STATUS_ALIASES: &[(&str, TaskStatus)] = &[
    ("PENDING", TaskStatus::ToDo),
    ("TO_DO", TaskStatus::ToDo),
    ("IN_PROGRESS", TaskStatus::InProgress),
    ("REVIEW", TaskStatus::Review),
    ("PENDING_APPROVAL", TaskStatus::Review),
    ("SUBMITTED", TaskStatus::Review),
    ("FOR_VERIFICATION", TaskStatus::Review),
    ("COMPLETED", TaskStatus::Completed),
    ("DONE", TaskStatus::Completed),
    ("APPROVED", TaskStatus::Completed),
    ("CANCELLED", TaskStatus::Cancelled),
    ("SKIP", TaskStatus::Cancelled),
];

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::ToDo,
        Self::InProgress,
        Self::Review,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::ToDo => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Review, Self::Completed, Self::Cancelled],
            Self::Review => &[Self::Completed, Self::InProgress],
            Self::Completed => &[],
            Self::Cancelled => &[Self::ToDo],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the task is still open work (the only states that can be overdue).
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::ToDo | Self::InProgress)
    }

    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "TO_DO",
            Self::InProgress => "IN_PROGRESS",
            Self::Review => "REVIEW",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Lower-case form sent in `PATCH /api/tasks/:id/status` bodies.
    #[must_use]
    pub const fn wire_str(self) -> &'static str {
        match self {
            Self::ToDo => "to_do",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::ToDo => 0,
            Self::InProgress => 1,
            Self::Review => 2,
            Self::Completed => 3,
            Self::Cancelled => 4,
        }
    }

    /// Upper-case the raw value and collapse whitespace (and hyphen) runs into `_`.
    #[must_use]
    pub fn canonical_key(raw: &str) -> String {
        raw.split(|ch: char| ch.is_whitespace() || ch == '-')
            .filter(|part| !part.is_empty())
            .map(str::to_uppercase)
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Look up a raw status in the alias table.
    #[must_use]
    pub fn from_alias(raw: &str) -> Option<Self> {
        let key = Self::canonical_key(raw);
        STATUS_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, status)| *status)
    }

    /// Map any raw status string to a canonical status. Unknown values are `TO_DO`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self::from_alias(raw).unwrap_or(Self::ToDo)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse used for user input: the value must be a known alias.
impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_alias(raw)
            .ok_or_else(|| CoreError::Validation(format!("unknown task status '{raw}'")))
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a task. Case-insensitive on input, upper-case on output.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    /// Parse a raw priority, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "NORMAL" => Some(Self::Normal),
            "HIGH" => Some(Self::High),
            "URGENT" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw).ok_or_else(|| CoreError::Validation(format!("unknown priority '{raw}'")))
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Consumer role whose vocabulary a view is rendered in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Staff / end-user doing the work.
    Staff,
    /// Supervisor verifying submitted work.
    Supervisor,
    /// Manager approving verified work.
    Manager,
    /// Admin task board.
    #[default]
    Board,
}

/// Label shown for an open task whose due date has passed.
pub const OVERDUE_LABEL: &str = "Overdue";

/// Display labels indexed in [`TaskStatus::ALL`] order.
type StatusLabels = [&'static str; 5];

const STAFF_LABELS: StatusLabels = ["Pending", "In Progress", "Submitted", "Completed", "Skipped"];
const SUPERVISOR_LABELS: StatusLabels = [
    "Assigned",
    "In Progress",
    "For Verification",
    "Verified",
    "Cancelled",
];
const MANAGER_LABELS: StatusLabels = [
    "Pending",
    "In Progress",
    "Pending Approval",
    "Completed",
    "Cancelled",
];
const BOARD_LABELS: StatusLabels = ["To Do", "In Progress", "Review", "Completed", "Cancelled"];

impl Role {
    pub const ALL: [Self; 4] = [Self::Staff, Self::Supervisor, Self::Manager, Self::Board];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Supervisor => "supervisor",
            Self::Manager => "manager",
            Self::Board => "board",
        }
    }

    const fn labels(self) -> &'static StatusLabels {
        match self {
            Self::Staff => &STAFF_LABELS,
            Self::Supervisor => &SUPERVISOR_LABELS,
            Self::Manager => &MANAGER_LABELS,
            Self::Board => &BOARD_LABELS,
        }
    }

    /// Label for a canonical status in this role's vocabulary.
    #[must_use]
    pub const fn status_label(self, status: TaskStatus) -> &'static str {
        self.labels()[status.index()]
    }

    /// Label with the derived overdue flag layered on top of open statuses.
    #[must_use]
    pub const fn display_label(self, status: TaskStatus, overdue: bool) -> &'static str {
        if overdue && status.is_open() {
            OVERDUE_LABEL
        } else {
            self.status_label(status)
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "staff" | "user" | "end_user" | "end-user" => Ok(Self::Staff),
            "supervisor" => Ok(Self::Supervisor),
            "manager" => Ok(Self::Manager),
            "board" | "admin" => Ok(Self::Board),
            _ => Err(CoreError::Validation(format!("unknown role '{raw}'"))),
        }
    }
}
