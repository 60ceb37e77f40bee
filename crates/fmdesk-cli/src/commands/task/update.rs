use chrono::Utc;
use fmdesk_core::requests::{TaskUpdate, TaskUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_clock, parse_due, parse_estimate, parse_priority};
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::TaskDetail;

pub struct UpdateArgs<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub location: Option<&'a str>,
    pub assignee: Option<&'a str>,
    pub unassign: bool,
    pub priority: Option<&'a str>,
    pub due: Option<&'a str>,
    pub estimate: Option<&'a str>,
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
}

/// Empty strings clear the optional text fields.
fn clearable(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn build_update(args: &UpdateArgs<'_>) -> anyhow::Result<TaskUpdate> {
    let mut builder = TaskUpdateBuilder::new();
    if let Some(title) = args.title {
        builder = builder.title(title.trim());
    }
    if let Some(description) = args.description {
        builder = builder.description(clearable(description));
    }
    if let Some(category) = args.category {
        builder = builder.category(category.trim());
    }
    if let Some(location) = args.location {
        builder = builder.location(clearable(location));
    }
    if args.unassign {
        builder = builder.assignee_id(None);
    } else if let Some(assignee) = args.assignee {
        builder = builder.assignee_id(Some(assignee.to_string()));
    }
    if let Some(priority) = args.priority {
        builder = builder.priority(parse_priority(priority)?);
    }
    if let Some(due) = args.due {
        let due_date = if due.trim().is_empty() {
            None
        } else {
            Some(parse_due(due)?)
        };
        builder = builder.due_date(due_date);
    }
    if let Some(estimate) = args.estimate {
        builder = builder.estimated_duration(parse_estimate(estimate)?);
    }
    if let (Some(start), Some(end)) = (args.start, args.end) {
        builder = builder.schedule(parse_clock(start, "start")?, parse_clock(end, "end")?);
    }
    Ok(builder.build())
}

pub async fn run(id: &str, args: &UpdateArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let update = build_update(args)?;
    let task = ctx.service.update(id, &update).await?;
    let detail = TaskDetail::project(&task, flags.role, Utc::now(), ctx.default_estimate());
    output(&detail, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{UpdateArgs, build_update};

    fn empty() -> UpdateArgs<'static> {
        UpdateArgs {
            title: None,
            description: None,
            category: None,
            location: None,
            assignee: None,
            unassign: false,
            priority: None,
            due: None,
            estimate: None,
            start: None,
            end: None,
        }
    }

    #[test]
    fn no_flags_builds_an_empty_update() {
        assert!(build_update(&empty()).unwrap().is_empty());
    }

    #[test]
    fn unassign_and_blank_due_clear_fields() {
        let update = build_update(&UpdateArgs {
            unassign: true,
            due: Some(""),
            description: Some("  "),
            ..empty()
        })
        .unwrap();

        assert_eq!(update.assignee_id, Some(None));
        assert_eq!(update.due_date, Some(None));
        assert_eq!(update.description, Some(None));
    }

    #[test]
    fn schedule_sets_both_times() {
        let update = build_update(&UpdateArgs {
            start: Some("08:00"),
            end: Some("09:30"),
            ..empty()
        })
        .unwrap();
        assert!(update.start_time.is_some());
        assert!(update.end_time.is_some());
        assert!(!update.is_empty());
    }

    #[test]
    fn bad_priority_is_rejected() {
        assert!(
            build_update(&UpdateArgs {
                priority: Some("asap"),
                ..empty()
            })
            .is_err()
        );
    }
}
