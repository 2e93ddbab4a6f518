//! Installation paths and environment preconditions
//!
//! Two values must be supplied by the hosting session before anything else
//! runs: the installation root (`CHIEF_PATH`) and the configuration file
//! path (`CHIEF_CONFIG`). Both can also arrive as command-line options.

use std::path::{Path, PathBuf};

use crate::error::{ChiefError, Result};

/// Core units live under the installation root at this relative path.
pub const CORE_PLUGINS_SUBDIR: &str = "libs/core/plugins";

/// Resolved installation paths for one invocation
#[derive(Debug, Clone)]
pub struct ChiefPaths {
    /// Installation root (CHIEF_PATH)
    pub root: PathBuf,
    /// User configuration file (CHIEF_CONFIG)
    pub config_path: PathBuf,
}

impl ChiefPaths {
    /// Resolve paths from CLI options (clap already merged the env vars).
    ///
    /// Absence of either value is a fatal precondition failure.
    pub fn resolve(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let root = root.ok_or_else(|| ChiefError::EnvironmentNotConfigured {
            name: "CHIEF_PATH".to_string(),
        })?;
        let config_path = config.ok_or_else(|| ChiefError::EnvironmentNotConfigured {
            name: "CHIEF_CONFIG".to_string(),
        })?;

        // Canonicalize the root when it exists so reports print stable paths;
        // the config file may legitimately not exist yet (config init).
        let root = dunce::canonicalize(&root).unwrap_or(root);

        Ok(Self { root, config_path })
    }

    /// Directory holding the core units shipped with the installation
    pub fn core_plugins_dir(&self) -> PathBuf {
        self.root.join(CORE_PLUGINS_SUBDIR)
    }

    /// Verify the core plugins directory exists (fatal when absent)
    pub fn require_core_plugins_dir(&self) -> Result<PathBuf> {
        let dir = self.core_plugins_dir();
        if !dir.is_dir() {
            return Err(ChiefError::CorePluginsDirMissing {
                path: dir.display().to_string(),
            });
        }
        Ok(dir)
    }
}

/// Expand a leading `~/` to the user's home directory.
///
/// Paths without the prefix are returned as-is; if no home directory can be
/// determined the literal path is kept rather than guessing.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(path).to_path_buf()
}
