use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// List discovered units with their load states (default)
    #[arg(long)]
    pub units: bool,

    /// List the registered command table, aliases included
    #[arg(long)]
    pub commands: bool,
}
