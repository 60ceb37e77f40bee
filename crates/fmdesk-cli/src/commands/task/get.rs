use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::TaskDetail;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = ctx.service.get(id).await?;
    let detail = TaskDetail::project(&task, flags.role, Utc::now(), ctx.default_estimate());
    output(&detail, flags.format)
}
