use clap::{Parser, Subcommand};

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Reconcile the configuration file against the shipped schema
    Update(UpdateArgs),

    /// Write a fresh configuration file from the shipped template
    Init,
}

/// Arguments for config update
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the timestamped backup even when the config enables it
    #[arg(long)]
    pub no_backup: bool,
}
