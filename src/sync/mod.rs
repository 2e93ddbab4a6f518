//! Remote extension sync manager
//!
//! Treats the user plugins directory as a working copy of a git-backed
//! repository: clones it on first use, fast-forwards it on demand, switches
//! tracked branches, and refuses to touch a dirty copy unless the caller
//! explicitly forces it. Uncommitted local edits to synchronized units are
//! never silently overwritten.
//!
//! Each attempt that leaves a commit checked out records the synced hash in
//! a JSON sidecar next to the working copy (never inside it, so the
//! bookkeeping cannot dirty the copy it describes).

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{PluginsType, Settings};
use crate::error::{ChiefError, Result};
use crate::git;

/// The configured remote repository backing the plugins directory
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    pub url: String,
    pub branch: String,
    pub local_path: PathBuf,
    pub auto_update: bool,
}

/// Assessed state of the working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingCopyState {
    NotCloned,
    CleanAtHead,
    Dirty,
    BranchMismatch { checked_out: Option<String> },
}

/// What a sync attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    NoActionNeeded,
    ClonedFresh,
    UpdatedClean,
    BlockedByLocalChanges,
    BranchSwitched,
}

impl SyncDecision {
    pub fn describe(&self) -> &'static str {
        match self {
            SyncDecision::NoActionNeeded => "already up to date",
            SyncDecision::ClonedFresh => "cloned fresh working copy",
            SyncDecision::UpdatedClean => "updated to remote tip",
            SyncDecision::BlockedByLocalChanges => "blocked by local changes",
            SyncDecision::BranchSwitched => "switched to configured branch",
        }
    }
}

/// Update availability, for informational hints only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    NotCloned,
    UpToDate { hash: String },
    UpdateAvailable { local: String, remote: String },
}

/// Persisted sync bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncState {
    pub url: String,
    pub branch: String,
    pub last_synced_hash: String,
}

/// Drives clone/update/branch-switch for one [`RemoteRepository`]
#[derive(Debug)]
pub struct SyncManager {
    repo: RemoteRepository,
}

impl SyncManager {
    pub fn new(repo: RemoteRepository) -> Self {
        Self { repo }
    }

    /// Build a manager from settings; requires remote plugins type and a
    /// configured repository URL.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.plugins_type != PluginsType::Remote {
            return Err(ChiefError::SyncNotConfigured);
        }
        let url = settings
            .git_repo
            .clone()
            .ok_or(ChiefError::SyncNotConfigured)?;
        Ok(Self::new(RemoteRepository {
            url,
            branch: settings.git_branch.clone(),
            local_path: settings.plugins_path.clone(),
            auto_update: settings.git_autoupdate,
        }))
    }

    pub fn repository(&self) -> &RemoteRepository {
        &self.repo
    }

    /// Assess the working copy without mutating anything
    pub fn assess(&self) -> Result<WorkingCopyState> {
        if !self.repo.local_path.join(".git").exists() {
            return Ok(WorkingCopyState::NotCloned);
        }
        let repo = git::open(&self.repo.local_path)?;

        if git::is_dirty(&repo)? {
            return Ok(WorkingCopyState::Dirty);
        }

        let checked_out = git::head_branch_name(&repo)?;
        if checked_out.as_deref() != Some(self.repo.branch.as_str()) {
            return Ok(WorkingCopyState::BranchMismatch { checked_out });
        }
        Ok(WorkingCopyState::CleanAtHead)
    }

    /// Execute one sync attempt under the configured policy.
    ///
    /// A dirty working copy without `force` is surfaced as
    /// [`SyncDecision::BlockedByLocalChanges`]; the caller decides whether
    /// to force, commit, or leave it.
    pub fn sync(&self, force: bool) -> Result<SyncDecision> {
        match self.assess()? {
            WorkingCopyState::NotCloned => {
                if let Some(parent) = self.repo.local_path.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| ChiefError::io("Failed to create plugins directory", &e))?;
                }
                let repo =
                    git::clone_branch(&self.repo.url, &self.repo.branch, &self.repo.local_path)?;
                self.record_state(&repo)?;
                Ok(SyncDecision::ClonedFresh)
            }
            WorkingCopyState::Dirty if !force => Ok(SyncDecision::BlockedByLocalChanges),
            WorkingCopyState::Dirty => self.update(),
            WorkingCopyState::BranchMismatch { .. } => self.update().map(|_| {
                // the observable outcome is the switch, even when the pull
                // also advanced the branch
                SyncDecision::BranchSwitched
            }),
            WorkingCopyState::CleanAtHead => self.update(),
        }
    }

    /// Fetch, align the branch if needed, fast-forward, record state
    fn update(&self) -> Result<SyncDecision> {
        let repo = git::open(&self.repo.local_path)?;

        git::fetch_branch(&repo, &self.repo.branch)?;

        let checked_out = git::head_branch_name(&repo)?;
        if checked_out.as_deref() != Some(self.repo.branch.as_str()) {
            git::checkout_branch(&repo, &self.repo.branch)?;
        }

        let decision = match git::fast_forward(&repo, &self.repo.branch)? {
            git::FastForward::UpToDate => SyncDecision::NoActionNeeded,
            git::FastForward::Advanced => SyncDecision::UpdatedClean,
            git::FastForward::Diverged => {
                return Err(ChiefError::SyncDiverged {
                    branch: self.repo.branch.clone(),
                });
            }
        };
        self.record_state(&repo)?;
        Ok(decision)
    }

    /// Compare local HEAD with the remote branch tip, mutating nothing
    pub fn check_updates(&self) -> Result<UpdateStatus> {
        if !self.repo.local_path.join(".git").exists() {
            return Ok(UpdateStatus::NotCloned);
        }
        let repo = git::open(&self.repo.local_path)?;
        let local = git::head_commit(&repo)?;
        let remote = git::remote_tip(&self.repo.url, &self.repo.branch)?;

        if local == remote {
            Ok(UpdateStatus::UpToDate { hash: local })
        } else {
            Ok(UpdateStatus::UpdateAvailable { local, remote })
        }
    }

    /// Sidecar path holding the persisted [`SyncState`]
    pub fn state_path(&self) -> PathBuf {
        let name = self
            .repo
            .local_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "plugins".to_string());
        match self.repo.local_path.parent() {
            Some(parent) => parent.join(format!("{name}.sync.json")),
            None => PathBuf::from(format!("{name}.sync.json")),
        }
    }

    /// Last recorded sync state, if any
    pub fn load_state(&self) -> Option<SyncState> {
        let content = fs::read_to_string(self.state_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn record_state(&self, repo: &git2::Repository) -> Result<()> {
        let state = SyncState {
            url: self.repo.url.clone(),
            branch: self.repo.branch.clone(),
            last_synced_hash: git::head_commit(repo)?,
        };
        let path = self.state_path();
        let content = serde_json::to_string_pretty(&state)
            .map_err(|e| ChiefError::io("Failed to serialize sync state", &e.into()))?;
        fs::write(&path, content)
            .map_err(|e| ChiefError::io("Failed to write sync state", &e))?;
        Ok(())
    }
}
