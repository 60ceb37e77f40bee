use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::WorkflowSummary;
use crate::ui;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.approve(id).await?;
    ui::banner(report.snapshot.banner.as_deref());
    output(&WorkflowSummary::from_report("approve", &report, flags.role), flags.format)
}
