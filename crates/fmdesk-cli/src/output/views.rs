//! Response shapes printed by commands, and their table layouts.

use chrono::{DateTime, Utc};
use fmdesk_client::WorkflowReport;
use fmdesk_core::activity::{ActivityEvent, ActivityKind};
use fmdesk_core::entities::{PersonRef, Task};
use fmdesk_core::enums::Role;
use fmdesk_core::parse::{format_clock_time, format_duration};
use fmdesk_core::views::{Dashboard, TaskView};
use serde::Serialize;

use crate::output::Tabular;
use crate::output::table::{Cell, TableOptions, Tone, render_key_values, render_table, status_tone};

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string())
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn status_cell(view: &TaskView) -> Cell {
    Cell::toned(view.status_label.clone(), status_tone(view.status, view.overdue))
}

// ---------------------------------------------------------------------------
// Task lists
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TaskList(pub Vec<TaskView>);

impl Tabular for TaskList {
    fn to_table(&self, options: TableOptions) -> String {
        task_rows_table(&self.0, options)
    }
}

fn task_rows_table(views: &[TaskView], options: TableOptions) -> String {
    let rows = views
        .iter()
        .map(|view| {
            vec![
                Cell::from(view.id.as_str()),
                Cell::from(view.title.as_str()),
                Cell::from(view.assignee.as_str()),
                Cell::from(view.priority.as_str()),
                status_cell(view),
                Cell::from(timestamp(view.due_date)),
                Cell::from(or_dash(view.progress.as_deref())),
            ]
        })
        .collect::<Vec<_>>();
    render_table(
        &["id", "title", "assignee", "priority", "status", "due", "progress"],
        &rows,
        options,
    )
}

impl Tabular for TaskView {
    fn to_table(&self, options: TableOptions) -> String {
        render_key_values(
            vec![
                ("id", Cell::from(self.id.as_str())),
                ("title", Cell::from(self.title.as_str())),
                ("status", status_cell(self)),
                ("assignee", Cell::from(self.assignee.as_str())),
                ("due", Cell::from(timestamp(self.due_date))),
            ],
            options,
        )
    }
}

// ---------------------------------------------------------------------------
// Task detail
// ---------------------------------------------------------------------------

/// A role view of one task plus the fields only the detail screen shows.
#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub view: TaskView,
    pub description: Option<String>,
    pub assigned_by: Option<String>,
    pub raw_status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub estimate: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskDetail {
    pub fn project(task: &Task, role: Role, now: DateTime<Utc>, fallback_estimate: u32) -> Self {
        Self {
            view: TaskView::project(task, role, now, fallback_estimate),
            description: task.description.clone(),
            assigned_by: task
                .assigned_by
                .as_ref()
                .and_then(PersonRef::display)
                .map(str::to_string),
            raw_status: task.raw_status.clone(),
            start_time: task.schedule.start_time.map(format_clock_time),
            end_time: task.schedule.end_time.map(format_clock_time),
            estimate: task.estimated_minutes.map(format_duration),
            created_at: task.created_at,
            updated_at: task.updated_at,
            completed_at: task.completed_at,
        }
    }
}

impl Tabular for TaskDetail {
    fn to_table(&self, options: TableOptions) -> String {
        let view = &self.view;
        let schedule = match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => format!("{start} - {end}"),
            (Some(start), None) => start.clone(),
            _ => "-".to_string(),
        };
        render_key_values(
            vec![
                ("id", Cell::from(view.id.as_str())),
                ("title", Cell::from(view.title.as_str())),
                ("status", status_cell(view)),
                ("priority", Cell::from(view.priority.as_str())),
                ("category", Cell::from(view.category.as_str())),
                ("location", Cell::from(or_dash(view.location.as_deref()))),
                ("assignee", Cell::from(view.assignee.as_str())),
                ("assigned by", Cell::from(or_dash(self.assigned_by.as_deref()))),
                ("due", Cell::from(timestamp(view.due_date))),
                ("schedule", Cell::from(schedule)),
                ("estimate", Cell::from(or_dash(self.estimate.as_deref()))),
                ("progress", Cell::from(or_dash(view.progress.as_deref()))),
                ("description", Cell::from(or_dash(self.description.as_deref()))),
                ("created", Cell::from(timestamp(self.created_at))),
                ("updated", Cell::from(timestamp(self.updated_at))),
                ("completed", Cell::from(timestamp(self.completed_at))),
            ],
            options,
        )
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct WorkflowSummary {
    pub id: String,
    pub action: &'static str,
    pub status_label: String,
    pub path: &'static str,
    pub comment: Option<String>,
    /// Tasks in the list refetched after the action.
    pub refreshed: usize,
    #[serde(skip)]
    tone: Tone,
}

impl WorkflowSummary {
    pub fn from_report(action: &'static str, report: &WorkflowReport, role: Role) -> Self {
        let task = &report.outcome.task;
        Self {
            id: task.id.clone(),
            action,
            status_label: role.status_label(task.status).to_string(),
            path: report.outcome.path.as_str(),
            comment: report.outcome.comment.clone(),
            refreshed: report.snapshot.tasks.len(),
            tone: status_tone(task.status, false),
        }
    }
}

impl Tabular for WorkflowSummary {
    fn to_table(&self, options: TableOptions) -> String {
        render_key_values(
            vec![
                ("id", Cell::from(self.id.as_str())),
                ("action", Cell::from(self.action)),
                ("status", Cell::toned(self.status_label.clone(), self.tone)),
                ("via", Cell::from(self.path)),
                ("comment", Cell::from(or_dash(self.comment.as_deref()))),
                ("refreshed", Cell::from(self.refreshed.to_string())),
            ],
            options,
        )
    }
}

// ---------------------------------------------------------------------------
// Activity and dashboard
// ---------------------------------------------------------------------------

const fn kind_cell(kind: ActivityKind) -> (&'static str, Tone) {
    match kind {
        ActivityKind::PendingApproval => ("pending approval", Tone::Attention),
        ActivityKind::Completed => ("completed", Tone::Good),
        ActivityKind::Overdue => ("overdue", Tone::Bad),
        ActivityKind::Updated => ("updated", Tone::Plain),
    }
}

fn activity_table(events: &[ActivityEvent], options: TableOptions) -> String {
    let rows = events
        .iter()
        .map(|event| {
            let (label, tone) = kind_cell(event.kind);
            vec![
                Cell::from(event.time_label.as_str()),
                Cell::toned(label, tone),
                Cell::from(event.message.as_str()),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["when", "kind", "message"], &rows, options)
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ActivityFeed(pub Vec<ActivityEvent>);

impl Tabular for ActivityFeed {
    fn to_table(&self, options: TableOptions) -> String {
        activity_table(&self.0, options)
    }
}

impl Tabular for Dashboard {
    fn to_table(&self, options: TableOptions) -> String {
        let stats = &self.stats;
        let mut sections = vec![
            format!("Dashboard ({}) at {}", self.role, timestamp(Some(self.generated_at))),
            format!(
                "total {}  completed {} ({}%)  pending {}  awaiting approval {}  overdue {}",
                stats.total,
                stats.completed,
                stats.completed_pct,
                stats.pending,
                stats.pending_approval,
                stats.overdue
            ),
        ];

        let by_status = self
            .histogram
            .iter()
            .filter(|bucket| bucket.count > 0)
            .map(|bucket| format!("{} {}", self.role.status_label(bucket.status), bucket.count))
            .collect::<Vec<_>>();
        if !by_status.is_empty() {
            sections.push(by_status.join("  "));
        }

        let performance = self
            .performance
            .iter()
            .map(|bucket| {
                vec![
                    Cell::from(bucket.name.as_str()),
                    Cell::from(bucket.total.to_string()),
                    Cell::from(bucket.completed.to_string()),
                    Cell::from(format!("{}%", bucket.completion_pct)),
                ]
            })
            .collect::<Vec<_>>();
        sections.push(render_table(
            &["assignee", "total", "completed", "done"],
            &performance,
            options,
        ));

        if !self.awaiting_approval.is_empty() {
            sections.push(format!("Awaiting approval ({})", self.awaiting_approval.len()));
            sections.push(task_rows_table(&self.awaiting_approval, options));
        }

        sections.push("Recent activity".to_string());
        sections.push(activity_table(&self.activity, options));
        sections.join("\n\n")
    }
}
