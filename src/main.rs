//! Chief - composable plugin units for your interactive session
//!
//! Discovers plugin units (core and user, local or git-synchronized),
//! composes them into an explicit session state with optional prefix
//! aliases, and keeps the user configuration reconciled against the
//! shipped schema template.

use clap::Parser;

mod cli;
mod commands;
mod compose;
mod config;
mod error;
mod git;
mod paths;
mod progress;
mod session;
mod sync;
mod ui;
mod unit;

use cli::{Cli, Commands};
use paths::ChiefPaths;

fn main() {
    let cli = Cli::parse();

    // version and completions run without the environment preconditions;
    // everything else needs CHIEF_PATH and CHIEF_CONFIG resolved first
    let result = match cli.command {
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
        command => ChiefPaths::resolve(cli.root, cli.config).and_then(|paths| match command {
            Commands::Reload => commands::reload::run(paths, cli.verbose),
            Commands::List(args) => commands::list::run(paths, cli.verbose, args),
            Commands::Exec(args) => commands::exec::run(paths, cli.verbose, args),
            Commands::Sync(args) => commands::sync::run(paths, cli.verbose, args),
            Commands::Config(args) => commands::config::run(paths, args.command),
            // handled above, before path resolution
            Commands::Version | Commands::Completions(_) => Ok(()),
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
