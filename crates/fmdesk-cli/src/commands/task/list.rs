use fmdesk_core::requests::TaskFilter;
use fmdesk_core::views::TaskView;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_day, parse_priority, parse_status};
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::TaskList;
use crate::ui;

pub struct ListArgs<'a> {
    pub status: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub assignee: Option<&'a str>,
    pub due: Option<&'a str>,
}

pub fn build_filter(args: &ListArgs<'_>) -> anyhow::Result<TaskFilter> {
    Ok(TaskFilter {
        status: args.status.map(parse_status).transpose()?,
        priority: args.priority.map(parse_priority).transpose()?,
        assignee_id: args.assignee.map(str::to_string),
        due_date: args.due.map(parse_day).transpose()?,
    })
}

pub async fn run(args: &ListArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args)?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let snapshot = ctx.service.snapshot(&filter).await;
    ui::banner(snapshot.banner.as_deref());

    let mut views = TaskView::project_all(
        &snapshot.tasks,
        flags.role,
        snapshot.fetched_at,
        ctx.default_estimate(),
    );
    views.truncate(limit);

    output(&TaskList(views), flags.format)
}
