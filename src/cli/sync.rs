use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Pull the remote plugins working copy:\n    chief sync\n\n\
                   Only report whether updates exist:\n    chief sync --check\n\n\
                   Override the dirty working-copy guard:\n    chief sync --force")]
pub struct SyncArgs {
    /// Proceed even when the working copy has uncommitted local changes
    #[arg(long)]
    pub force: bool,

    /// Compare against the remote tip without touching the working copy
    #[arg(long)]
    pub check: bool,
}
