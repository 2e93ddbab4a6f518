//! Composition engine
//!
//! Merges discovered units into a fresh [`SessionState`] in a fixed order:
//! core units first, then user units (local directory or synchronized
//! working copy). Each pass re-reads and re-validates the configuration
//! file, so a reload picks up config edits without restarting the host
//! session. A unit that fails to load is recorded and skipped; the pass
//! always runs to completion.

use crate::config::{ConfigFile, PluginsType, Settings};
use crate::error::Result;
use crate::paths::ChiefPaths;
use crate::session::{RegisterOutcome, SessionState};
use crate::sync::{SyncDecision, SyncManager};
use crate::unit::{LoadState, Unit, UnitOrigin, UnitManifest, discovery};

/// Pipeline phase, advanced in order within one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposePhase {
    Idle,
    DiscoveringCore,
    LoadingCore,
    SyncOrDiscoverUser,
    LoadingUser,
    Composed,
}

/// How the sync stage ended, for the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local plugins type, autoupdate off, or no repository configured
    Skipped { reason: String },
    Attempted(SyncDecision),
    /// Sync failed; composition continued with the working copy as-is
    Failed(String),
}

/// What one composition pass did
#[derive(Debug)]
pub struct ComposeReport {
    /// All discovered units with their final load states, in load order
    pub units: Vec<Unit>,
    pub sync: SyncOutcome,
    /// Per-stage diagnostics; populated only when the pass ran verbose
    pub diagnostics: Vec<String>,
}

/// A finished pass: the live session plus its report
#[derive(Debug)]
pub struct Composition {
    pub session: SessionState,
    pub report: ComposeReport,
}

/// Drives the composition pipeline
pub struct Composer {
    paths: ChiefPaths,
    cli_verbose: bool,
    phase: ComposePhase,
}

impl Composer {
    pub fn new(paths: ChiefPaths, cli_verbose: bool) -> Self {
        Self {
            paths,
            cli_verbose,
            phase: ComposePhase::Idle,
        }
    }

    pub fn phase(&self) -> ComposePhase {
        self.phase
    }

    /// Run one full pass. Calling again is the forced reload: everything,
    /// including the configuration, is re-read from scratch.
    pub fn compose(&mut self) -> Result<Composition> {
        self.phase = ComposePhase::DiscoveringCore;

        // Validate the configuration before anything else touches session
        // state; a malformed file aborts the pass here.
        let config = ConfigFile::load(&self.paths.config_path)?;
        let settings = Settings::from_file(&config);
        let verbose = self.cli_verbose || settings.verbose;

        let core_dir = self.paths.require_core_plugins_dir()?;
        let mut units = discovery::discover_units(&core_dir, UnitOrigin::Core);

        let mut session = SessionState::new(settings);
        let mut report = ComposeReport {
            units: Vec::new(),
            sync: SyncOutcome::Skipped {
                reason: "local plugins".to_string(),
            },
            diagnostics: Vec::new(),
        };
        if verbose {
            report.diagnostics.push(format!(
                "discovered {} core unit(s) in {}",
                units.len(),
                core_dir.display()
            ));
        }

        self.phase = ComposePhase::LoadingCore;
        for unit in &mut units {
            load_unit(&mut session, unit, verbose, &mut report.diagnostics);
        }
        report.units.append(&mut units);

        self.phase = ComposePhase::SyncOrDiscoverUser;
        let user_origin = match session.settings.plugins_type {
            PluginsType::Local => UnitOrigin::UserLocal,
            PluginsType::Remote => {
                report.sync = self.sync_stage(&session.settings);
                UnitOrigin::UserRemote
            }
        };
        let user_dir = session.settings.plugins_path.clone();
        let mut user_units = discovery::discover_units(&user_dir, user_origin);
        if verbose {
            report.diagnostics.push(format!(
                "discovered {} user unit(s) in {}",
                user_units.len(),
                user_dir.display()
            ));
        }

        self.phase = ComposePhase::LoadingUser;
        for unit in &mut user_units {
            load_unit(&mut session, unit, verbose, &mut report.diagnostics);
        }
        report.units.append(&mut user_units);

        session.rebuild_aliases();
        self.phase = ComposePhase::Composed;

        Ok(Composition { session, report })
    }

    fn sync_stage(&self, settings: &Settings) -> SyncOutcome {
        if settings.git_repo.is_none() {
            return SyncOutcome::Skipped {
                reason: "no remote repository configured".to_string(),
            };
        }
        if !settings.git_autoupdate {
            let mut reason = "autoupdate is off".to_string();
            if settings.hints {
                reason.push_str("; run 'chief sync --check' to see if updates are available");
            }
            return SyncOutcome::Skipped { reason };
        }

        match SyncManager::from_settings(settings).and_then(|m| m.sync(false)) {
            Ok(decision) => SyncOutcome::Attempted(decision),
            Err(e) => SyncOutcome::Failed(e.to_string()),
        }
    }
}

/// Load one unit into the session; failures stay on the unit
fn load_unit(
    session: &mut SessionState,
    unit: &mut Unit,
    verbose: bool,
    diagnostics: &mut Vec<String>,
) {
    match UnitManifest::load(&unit.name, &unit.path) {
        Ok(manifest) => {
            let mut registered = 0usize;
            for command in manifest.commands {
                let name = command.name.clone();
                match session.register(&unit.name, command) {
                    RegisterOutcome::Registered => registered += 1,
                    RegisterOutcome::Collision => {
                        if verbose {
                            diagnostics.push(format!(
                                "unit '{}': name collision on '{}', first registration wins",
                                unit.name, name
                            ));
                        }
                    }
                }
            }
            unit.load_state = LoadState::Loaded;
            if verbose {
                diagnostics.push(format!(
                    "loaded {} unit '{}' ({} command(s))",
                    unit.origin.label(),
                    unit.name,
                    registered
                ));
            }
        }
        Err(e) => {
            unit.load_state = LoadState::Failed(e.to_string());
        }
    }
}
