use clap::{Args, Subcommand};

use crate::cli::subcommands::TaskCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Tasks: list, inspect, create, edit, and move through approval.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Role dashboard: headline counts, per-assignee completion, recent activity.
    Dashboard(DashboardArgs),
    /// Recent activity feed, newest first.
    Activity(ActivityArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DashboardArgs {
    /// Scope the dashboard to one assignee's tasks.
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ActivityArgs {
    /// Only include tasks assigned to this user.
    #[arg(long)]
    pub assignee: Option<String>,
}
