use clap::Parser;
use fmdesk_core::enums::Role;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `fmdesk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "fmdesk",
    version,
    about = "fmdesk - facility task desk: lists, approvals, and dashboards"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Max rows to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Status vocabulary to display: staff, supervisor, manager, board
    #[arg(short, long, global = true, default_value = "board")]
    pub role: Role,

    /// Table colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            role: self.role,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use fmdesk_core::enums::Role;

    use super::subcommands::TaskCommands;
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "fmdesk",
            "--format",
            "json",
            "--limit",
            "10",
            "--role",
            "manager",
            "activity",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.limit, Some(10));
        assert_eq!(cli.role, Role::Manager);
        assert!(matches!(cli.command, Commands::Activity(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["fmdesk", "task", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert_eq!(cli.role, Role::Board);
        assert!(matches!(
            cli.command,
            Commands::Task {
                action: TaskCommands::List { .. }
            }
        ));
    }

    #[test]
    fn role_aliases_are_accepted() {
        let cli = Cli::try_parse_from(["fmdesk", "--role", "admin", "dashboard"])
            .expect("cli should parse");
        assert_eq!(cli.global_flags().role, Role::Board);

        assert!(Cli::try_parse_from(["fmdesk", "--role", "janitor", "dashboard"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["fmdesk", "--format", "xml", "activity"]).is_err());
    }

    #[test]
    fn reject_takes_optional_comment() {
        let cli = Cli::try_parse_from(["fmdesk", "task", "reject", "t-1", "--comment", "redo"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Task {
                action: TaskCommands::Reject { ref id, ref comment }
            } if id == "t-1" && comment.as_deref() == Some("redo")
        ));
    }

    #[test]
    fn schedule_needs_both_ends() {
        assert!(Cli::try_parse_from(["fmdesk", "task", "update", "t-1", "--start", "08:00"]).is_err());
        assert!(
            Cli::try_parse_from([
                "fmdesk", "task", "update", "t-1", "--start", "08:00", "--end", "10:00",
            ])
            .is_ok()
        );
    }

    #[test]
    fn assignee_conflicts_with_unassign() {
        assert!(
            Cli::try_parse_from([
                "fmdesk", "task", "update", "t-1", "--assignee", "u-1", "--unassign",
            ])
            .is_err()
        );
    }
}
