use chrono::Utc;
use fmdesk_core::views::TaskView;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_status;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, status: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let next = parse_status(status)?;
    let task = ctx.service.set_status(id, next).await?;
    let view = TaskView::project(&task, flags.role, Utc::now(), ctx.default_estimate());
    output(&view, flags.format)
}
