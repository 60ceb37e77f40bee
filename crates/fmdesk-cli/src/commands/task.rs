mod approve;
mod create;
mod get;
mod list;
mod reject;
mod status;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `fmdesk task`.
pub async fn handle(action: &TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::List {
            status,
            priority,
            assignee,
            due,
        } => {
            let args = list::ListArgs {
                status: status.as_deref(),
                priority: priority.as_deref(),
                assignee: assignee.as_deref(),
                due: due.as_deref(),
            };
            list::run(&args, ctx, flags).await
        }
        TaskCommands::Get { id } => get::run(id, ctx, flags).await,
        TaskCommands::Create {
            title,
            description,
            category,
            location,
            assignee,
            priority,
            due,
            estimate,
        } => {
            let args = create::CreateArgs {
                title,
                description: description.as_deref(),
                category: category.as_deref(),
                location: location.as_deref(),
                assignee: assignee.as_deref(),
                priority: priority.as_deref(),
                due: due.as_deref(),
                estimate: estimate.as_deref(),
            };
            create::run(&args, ctx, flags).await
        }
        TaskCommands::Update {
            id,
            title,
            description,
            category,
            location,
            assignee,
            unassign,
            priority,
            due,
            estimate,
            start,
            end,
        } => {
            let args = update::UpdateArgs {
                title: title.as_deref(),
                description: description.as_deref(),
                category: category.as_deref(),
                location: location.as_deref(),
                assignee: assignee.as_deref(),
                unassign: *unassign,
                priority: priority.as_deref(),
                due: due.as_deref(),
                estimate: estimate.as_deref(),
                start: start.as_deref(),
                end: end.as_deref(),
            };
            update::run(id, &args, ctx, flags).await
        }
        TaskCommands::Status { id, status } => status::run(id, status, ctx, flags).await,
        TaskCommands::Approve { id } => approve::run(id, ctx, flags).await,
        TaskCommands::Reject { id, comment } => reject::run(id, comment.as_deref(), ctx, flags).await,
    }
}
