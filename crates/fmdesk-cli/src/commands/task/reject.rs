use fmdesk_client::WorkflowPath;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::WorkflowSummary;
use crate::ui;

pub async fn run(id: &str, comment: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.reject(id, comment).await?;
    if report.outcome.path == WorkflowPath::StatusFallback && !flags.quiet {
        eprintln!("reject endpoint unavailable; task moved back to in progress via status update");
    }
    ui::banner(report.snapshot.banner.as_deref());
    output(&WorkflowSummary::from_report("reject", &report, flags.role), flags.format)
}
