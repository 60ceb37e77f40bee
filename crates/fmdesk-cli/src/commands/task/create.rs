use chrono::Utc;
use fmdesk_core::requests::TaskDraft;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_due, parse_estimate, parse_priority};
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::TaskDetail;

pub struct CreateArgs<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub location: Option<&'a str>,
    pub assignee: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub due: Option<&'a str>,
    pub estimate: Option<&'a str>,
}

pub fn build_draft(args: &CreateArgs<'_>) -> anyhow::Result<TaskDraft> {
    Ok(TaskDraft {
        title: args.title.trim().to_string(),
        description: args.description.map(str::to_string),
        category: args.category.map(str::to_string),
        location: args.location.map(str::to_string),
        assignee_id: args.assignee.map(str::to_string),
        priority: args.priority.map(parse_priority).transpose()?.unwrap_or_default(),
        due_date: args.due.map(parse_due).transpose()?,
        estimated_duration: args.estimate.map(parse_estimate).transpose()?,
    })
}

pub async fn run(args: &CreateArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = build_draft(args)?;
    let task = ctx.service.create(&draft).await?;
    let detail = TaskDetail::project(&task, flags.role, Utc::now(), ctx.default_estimate());
    output(&detail, flags.format)
}

#[cfg(test)]
mod tests {
    use fmdesk_core::enums::Priority;
    use pretty_assertions::assert_eq;

    use super::{CreateArgs, build_draft};

    fn args<'a>(title: &'a str, estimate: Option<&'a str>) -> CreateArgs<'a> {
        CreateArgs {
            title,
            description: None,
            category: Some("Plumbing"),
            location: None,
            assignee: Some("u-2"),
            priority: None,
            due: Some("2024-06-02"),
            estimate,
        }
    }

    #[test]
    fn draft_defaults_priority_and_parses_estimate() {
        let draft = build_draft(&args("  Fix tap ", Some("1h 15m"))).unwrap();
        assert_eq!(draft.title, "Fix tap");
        assert_eq!(draft.priority, Priority::Normal);
        assert_eq!(draft.estimated_duration, Some(75));
        assert!(draft.due_date.is_some());
    }

    #[test]
    fn unparseable_estimate_is_rejected() {
        assert!(build_draft(&args("Fix tap", Some("a while"))).is_err());
    }
}
