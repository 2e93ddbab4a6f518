//! Typed view of recognized configuration keys
//!
//! A `Settings` value is a snapshot taken from a parsed configuration file;
//! absent or unrecognized values fall back to the schema defaults. The
//! snapshot is re-taken on every composition pass so edits take effect on
//! reload without restarting the host session.

use std::path::PathBuf;

use crate::config::file::ConfigFile;
use crate::paths::expand_tilde;

/// Where user plugins come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginsType {
    Local,
    Remote,
}

/// Interpreted configuration snapshot
#[derive(Debug, Clone)]
pub struct Settings {
    pub plugins_type: PluginsType,
    pub plugins_path: PathBuf,
    pub git_repo: Option<String>,
    pub git_branch: String,
    pub git_autoupdate: bool,
    /// Custom command prefix; `None` when unset or empty
    pub alias: Option<String>,
    pub verbose: bool,
    pub hints: bool,
    pub config_backup: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Settings {
    pub fn from_file(file: &ConfigFile) -> Self {
        let plugins_type = match file
            .str_value("CHIEF_CFG_PLUGINS_TYPE")
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("remote") => PluginsType::Remote,
            _ => PluginsType::Local,
        };

        let plugins_path = file
            .str_value("CHIEF_CFG_PLUGINS_PATH")
            .filter(|s| !s.is_empty())
            .map(|s| expand_tilde(&s))
            .unwrap_or_else(|| expand_tilde("~/chief_plugins"));

        Self {
            plugins_type,
            plugins_path,
            git_repo: non_empty(file.str_value("CHIEF_CFG_PLUGINS_GIT_REPO")),
            git_branch: non_empty(file.str_value("CHIEF_CFG_PLUGINS_GIT_BRANCH"))
                .unwrap_or_else(|| "main".to_string()),
            git_autoupdate: file
                .bool_value("CHIEF_CFG_PLUGINS_GIT_AUTOUPDATE")
                .unwrap_or(false),
            alias: non_empty(file.str_value("CHIEF_CFG_ALIAS")),
            verbose: file.bool_value("CHIEF_CFG_VERBOSE").unwrap_or(false),
            hints: file.bool_value("CHIEF_CFG_HINTS").unwrap_or(true),
            config_backup: file.bool_value("CHIEF_CFG_CONFIG_BACKUP").unwrap_or(true),
        }
    }
}
