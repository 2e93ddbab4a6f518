//! Config command: template reconciliation and first-time init

use std::fs;

use crate::cli::{ConfigSubcommand, UpdateArgs};
use crate::config::reconcile::reconcile;
use crate::config::schema::render_template;
use crate::config::{ConfigFile, Settings};
use crate::error::{ChiefError, Result};
use crate::paths::ChiefPaths;
use crate::ui;

pub fn run(paths: ChiefPaths, command: ConfigSubcommand) -> Result<()> {
    match command {
        ConfigSubcommand::Update(args) => update(&paths, &args),
        ConfigSubcommand::Init => init(&paths),
    }
}

fn update(paths: &ChiefPaths, args: &UpdateArgs) -> Result<()> {
    // honour the user's backup preference unless --no-backup overrides it
    let settings = Settings::from_file(&ConfigFile::load(&paths.config_path)?);
    let backup = settings.config_backup && !args.no_backup;

    let outcome = reconcile(&paths.config_path, args.dry_run, backup)?;

    if outcome.plan.is_empty() {
        println!("{} configuration is up to date", ui::success("·"));
        return Ok(());
    }

    for (old, new) in &outcome.plan.renames {
        println!("{} rename {} {} {}", ui::warn("~"), old, ui::dim("->"), new);
    }
    for (key, value) in &outcome.plan.additions {
        println!("{} add {}={}", ui::success("+"), key, value);
    }

    if args.dry_run {
        println!("{}", ui::dim("dry run: nothing written"));
    } else {
        if let Some(backup_path) = &outcome.backup_path {
            println!("{}", ui::dim(&format!("backup: {}", backup_path.display())));
        }
        println!("{} configuration updated", ui::bold("·"));
    }
    Ok(())
}

fn init(paths: &ChiefPaths) -> Result<()> {
    let path = &paths.config_path;
    if path.exists() {
        return Err(ChiefError::ConfigAlreadyExists {
            path: path.display().to_string(),
        });
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ChiefError::ConfigWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    fs::write(path, render_template()).map_err(|e| ChiefError::ConfigWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    println!("{} wrote {}", ui::success("·"), path.display());
    Ok(())
}
