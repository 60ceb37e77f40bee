use fmdesk_core::activity::recent_activity;
use fmdesk_core::requests::TaskFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivityArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::ActivityFeed;
use crate::ui;

/// Feed length: the global `--limit` wins over `dashboard.activity_limit`.
fn activity_limit(flag: Option<u32>, configured: usize) -> usize {
    effective_limit(flag, u32::try_from(configured).unwrap_or(u32::MAX))
}

/// Handle `fmdesk activity`.
pub async fn handle(args: &ActivityArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = TaskFilter {
        assignee_id: args.assignee.clone(),
        ..TaskFilter::default()
    };
    let snapshot = ctx.service.snapshot(&filter).await;
    ui::banner(snapshot.banner.as_deref());

    let limit = activity_limit(flags.limit, ctx.service.options().dashboard.activity_limit);
    let events = recent_activity(&snapshot.tasks, flags.role, snapshot.fetched_at, limit);

    output(&ActivityFeed(events), flags.format)
}
