//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument
//! types:
//! - list: List command arguments
//! - exec: Exec command arguments
//! - sync: Sync command arguments
//! - config: Config subcommands
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod config;
pub mod exec;
pub mod list;
pub mod sync;

pub use completions::CompletionsArgs;
pub use config::{ConfigArgs, ConfigSubcommand, UpdateArgs};
pub use exec::ExecArgs;
pub use list::ListArgs;
pub use sync::SyncArgs;

/// Chief - composable plugin units for your interactive session
#[derive(Parser, Debug)]
#[command(
    name = "chief",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Composable plugin units for your interactive session",
    long_about = "Chief discovers plugin units (core and user, local or git-synchronized), \
                  composes them into an explicit session with optional prefix aliases, and \
                  keeps the configuration file reconciled against the shipped schema.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  chief reload                    \x1b[90m# Recompose the session, re-reading the config\x1b[0m\n   \
                  chief list --commands           \x1b[90m# Show the registered command table\x1b[0m\n   \
                  chief exec chief.aws_export     \x1b[90m# Run a composed command\x1b[0m\n   \
                  chief sync --check              \x1b[90m# See if remote plugin updates are available\x1b[0m\n   \
                  chief config update --dry-run   \x1b[90m# Preview configuration reconciliation\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Installation root (defaults to $CHIEF_PATH)
    #[arg(long, global = true, env = "CHIEF_PATH", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to $CHIEF_CONFIG)
    #[arg(long, global = true, env = "CHIEF_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recompose the session from scratch, re-reading the configuration
    Reload,

    /// List discovered units or registered commands
    List(ListArgs),

    /// Run a composed command by canonical or aliased name
    Exec(ExecArgs),

    /// Synchronize the remote plugins working copy
    Sync(SyncArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
