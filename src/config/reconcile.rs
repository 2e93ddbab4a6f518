//! Configuration reconciliation against the built-in template
//!
//! Brings an existing user file up to the current schema: renamed keys are
//! migrated in place, missing keys are appended with their documentation
//! comment and default, everything else (user overrides, custom keys,
//! comments) is left untouched. Running twice in a row is a no-op: the
//! second pass computes an empty plan and writes nothing, not even a backup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::file::ConfigFile;
use crate::config::schema::{SchemaEntry, TEMPLATE};
use crate::error::{ChiefError, Result};

/// What a reconciliation pass would change
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    /// Keys to append, with their rendered default values
    pub additions: Vec<(String, String)>,
    /// Old key name migrated to new key name
    pub renames: Vec<(String, String)>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.renames.is_empty()
    }
}

/// Result of one reconciliation run
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub plan: ReconcilePlan,
    /// Backup written before the change, if any
    pub backup_path: Option<PathBuf>,
    /// Whether the configuration file was rewritten
    pub written: bool,
}

/// Apply the template to a parsed file, returning what changed.
///
/// Renames happen before absence checks so a migrated key is not also
/// re-appended under its new name.
fn apply_template(file: &mut ConfigFile, template: &[SchemaEntry]) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for entry in template {
        if let Some(old) = entry.rename_from {
            if file.contains_key(old) && file.rename_key(old, entry.key) {
                plan.renames.push((old.to_string(), entry.key.to_string()));
                continue;
            }
        }
        if !file.contains_key(entry.key) {
            let value = entry.default.render();
            file.append_entry(entry.doc, entry.key, &value);
            plan.additions.push((entry.key.to_string(), value));
        }
    }

    plan
}

/// Reconcile the file at `path` against the shipped template.
///
/// `dry_run` computes and returns the plan without touching the filesystem.
/// `backup` controls the timestamped pre-change copy; it is skipped outright
/// when the plan is empty.
pub fn reconcile(path: &Path, dry_run: bool, backup: bool) -> Result<ReconcileOutcome> {
    let mut file = ConfigFile::load(path)?;
    let plan = apply_template(&mut file, TEMPLATE);

    if plan.is_empty() || dry_run {
        return Ok(ReconcileOutcome {
            plan,
            backup_path: None,
            written: false,
        });
    }

    let backup_path = if backup {
        Some(write_backup(path)?)
    } else {
        None
    };
    file.save()?;

    Ok(ReconcileOutcome {
        plan,
        backup_path,
        written: true,
    })
}

/// Copy the pre-change file to `<name>.<timestamp>.bak` next to it
fn write_backup(path: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "chief.conf".to_string());
    let backup = path.with_file_name(format!("{name}.{stamp}.bak"));

    fs::copy(path, &backup).map_err(|e| ChiefError::ConfigWriteFailed {
        path: backup.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(backup)
}
