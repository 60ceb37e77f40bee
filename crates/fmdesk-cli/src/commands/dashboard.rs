use crate::cli::GlobalFlags;
use crate::cli::root_commands::DashboardArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `fmdesk dashboard`.
pub async fn handle(args: &DashboardArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (dashboard, snapshot) = ctx
        .service
        .dashboard(flags.role, args.assignee.as_deref())
        .await;
    ui::banner(snapshot.banner.as_deref());
    output(&dashboard, flags.format)
}
