//! Sync command: explicit synchronization of the remote plugins copy

use crate::cli::SyncArgs;
use crate::config::{ConfigFile, Settings};
use crate::error::{ChiefError, Result};
use crate::paths::ChiefPaths;
use crate::sync::{SyncDecision, SyncManager, UpdateStatus};
use crate::ui;

pub fn run(paths: ChiefPaths, verbose: bool, args: SyncArgs) -> Result<()> {
    let config = ConfigFile::load(&paths.config_path)?;
    let settings = Settings::from_file(&config);
    let manager = SyncManager::from_settings(&settings)?;

    if args.check {
        return check(&manager);
    }

    let decision = manager.sync(args.force)?;
    if decision == SyncDecision::BlockedByLocalChanges {
        return Err(ChiefError::SyncBlocked {
            path: manager.repository().local_path.display().to_string(),
        });
    }

    println!("{} {}", ui::success("·"), decision.describe());
    if !manager.repository().auto_update {
        println!(
            "{}",
            ui::dim("autoupdate is off; composition will not pull automatically")
        );
    }
    if verbose {
        if let Some(state) = manager.load_state() {
            println!(
                "{}",
                ui::dim(&format!(
                    "{} @ {} = {}",
                    state.url, state.branch, state.last_synced_hash
                ))
            );
        }
    }
    Ok(())
}

fn check(manager: &SyncManager) -> Result<()> {
    match manager.check_updates()? {
        UpdateStatus::NotCloned => {
            println!(
                "{} working copy not cloned yet; run 'chief sync'",
                ui::warn("!")
            );
        }
        UpdateStatus::UpToDate { hash } => {
            println!(
                "{} up to date {}",
                ui::success("·"),
                ui::dim(&format!("({})", &hash[..12.min(hash.len())]))
            );
        }
        UpdateStatus::UpdateAvailable { local, remote } => {
            println!(
                "{} updates available: local {} remote {}",
                ui::warn("!"),
                &local[..12.min(local.len())],
                &remote[..12.min(remote.len())]
            );
            println!("{}", ui::dim("run 'chief sync' to pull"));
        }
    }
    Ok(())
}
