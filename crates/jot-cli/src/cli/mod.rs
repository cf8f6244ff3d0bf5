use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `jot` binary.
#[derive(Debug, Parser)]
#[command(
    name = "jot",
    version,
    about = "Log what you did in plain words; jot files it in Notion"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no result output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }

    /// The command to run; bare `jot` means `jot log`.
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Log(root_commands::LogArgs::default()))
    }
}
