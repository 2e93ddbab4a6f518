//! Reload command: one forced composition pass

use crate::compose::Composer;
use crate::error::Result;
use crate::paths::ChiefPaths;

pub fn run(paths: ChiefPaths, verbose: bool) -> Result<()> {
    let mut composer = Composer::new(paths, verbose);
    let composition = composer.compose()?;
    super::render_report(&composition);
    Ok(())
}
