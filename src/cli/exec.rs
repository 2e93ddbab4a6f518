use clap::Parser;

/// Arguments for the exec command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Run a canonical command:\n    chief exec chief.aws_export\n\n\
                   Run through a configured alias:\n    chief exec cf.aws_export\n\n\
                   Bound a slow command:\n    chief exec chief.ssl_renew --timeout 120")]
pub struct ExecArgs {
    /// Canonical or aliased command name
    pub name: String,

    /// Kill the command after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip the confirmation prompt for commands that request one
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_exec_with_timeout() {
        let cli =
            Cli::try_parse_from(["chief", "exec", "chief.x", "--timeout", "30", "-y"]).unwrap();
        match cli.command {
            Commands::Exec(args) => {
                assert_eq!(args.name, "chief.x");
                assert_eq!(args.timeout, Some(30));
                assert!(args.yes);
            }
            _ => panic!("Expected Exec command"),
        }
    }
}
