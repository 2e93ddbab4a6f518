//! Exec command: resolve a composed command and run its glue line

use std::time::Duration;

use crate::cli::ExecArgs;
use crate::compose::Composer;
use crate::error::{ChiefError, Result};
use crate::paths::ChiefPaths;
use crate::progress;
use crate::ui;

pub fn run(paths: ChiefPaths, verbose: bool, args: ExecArgs) -> Result<()> {
    let mut composer = Composer::new(paths, verbose);
    let composition = composer.compose()?;

    let entry = composition
        .session
        .resolve(&args.name)
        .ok_or_else(|| ChiefError::CommandNotFound {
            name: args.name.clone(),
        })?;
    let spec = &entry.spec;

    if spec.confirm && !args.yes {
        let question = format!("Run '{}'?", spec.name);
        if !ui::confirm(&question)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let timeout = args.timeout.map(Duration::from_secs);
    let result = progress::run_shell_with_progress(&spec.name, &spec.run, timeout)?;

    print!("{}", result.output);
    if !result.success() {
        return Err(ChiefError::CommandFailed {
            label: spec.name.clone(),
            code: result.code,
        });
    }
    Ok(())
}
