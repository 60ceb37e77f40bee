use clap::Subcommand;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks.
    List {
        /// Status or alias (e.g. `review`, `pending approval`, `done`).
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Assignee user id.
        #[arg(long)]
        assignee: Option<String>,
        /// Due on this day (`YYYY-MM-DD`).
        #[arg(long)]
        due: Option<String>,
    },
    /// Get a task by ID.
    Get { id: String },
    /// Create a task.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date or timestamp.
        #[arg(long)]
        due: Option<String>,
        /// Estimated duration: minutes, `1h 30m`, or `HH:MM`.
        #[arg(long)]
        estimate: Option<String>,
    },
    /// Update a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, conflicts_with = "unassign")]
        assignee: Option<String>,
        /// Remove the current assignee.
        #[arg(long)]
        unassign: bool,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        estimate: Option<String>,
        /// Scheduled start time (`HH:MM`).
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// Scheduled end time (`HH:MM`).
        #[arg(long, requires = "start")]
        end: Option<String>,
    },
    /// Move a task to another status.
    Status { id: String, status: String },
    /// Approve a task awaiting review.
    Approve { id: String },
    /// Send a task awaiting review back for rework.
    Reject {
        id: String,
        #[arg(long)]
        comment: Option<String>,
    },
}
