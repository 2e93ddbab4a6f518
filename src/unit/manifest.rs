//! Unit manifest parsing
//!
//! A unit file is a YAML manifest declaring the commands it contributes.
//! The core never interprets what a command's program does; `run` is glue
//! handed to the executor verbatim.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ChiefError, Result};

/// One command contributed by a unit
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Full command name, e.g. `chief.aws_export`
    pub name: String,
    /// Program line executed on invocation
    pub run: String,
    /// One-line description shown in listings
    #[serde(default)]
    pub summary: Option<String>,
    /// Ask for confirmation before running
    #[serde(default)]
    pub confirm: bool,
}

/// Parsed unit file content
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct UnitManifest {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

impl UnitManifest {
    /// Read and validate the manifest for unit `unit_name` at `path`
    pub fn load(unit_name: &str, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ChiefError::UnitLoadFailed {
            unit: unit_name.to_string(),
            reason: e.to_string(),
        })?;
        let manifest: UnitManifest =
            serde_yaml::from_str(&content).map_err(|e| ChiefError::UnitLoadFailed {
                unit: unit_name.to_string(),
                reason: e.to_string(),
            })?;
        manifest.validate(unit_name)?;
        Ok(manifest)
    }

    fn validate(&self, unit_name: &str) -> Result<()> {
        for cmd in &self.commands {
            if cmd.name.trim().is_empty() {
                return Err(ChiefError::UnitLoadFailed {
                    unit: unit_name.to_string(),
                    reason: "command with empty name".to_string(),
                });
            }
            if cmd.name.chars().any(char::is_whitespace) {
                return Err(ChiefError::UnitLoadFailed {
                    unit: unit_name.to_string(),
                    reason: format!("command name '{}' contains whitespace", cmd.name),
                });
            }
            if cmd.run.trim().is_empty() {
                return Err(ChiefError::UnitLoadFailed {
                    unit: unit_name.to_string(),
                    reason: format!("command '{}' has an empty run line", cmd.name),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_str(content: &str) -> Result<UnitManifest> {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_chief-plugin.yaml");
        fs::write(&path, content).unwrap();
        UnitManifest::load("test", &path)
    }

    #[test]
    fn test_load_full_manifest() {
        let manifest = load_str(
            "summary: AWS credential helpers\ncommands:\n  - name: chief.aws_export\n    run: aws-creds export\n    summary: Print export lines\n  - name: chief.aws_set_role\n    run: aws-creds set-role\n    confirm: true\n",
        )
        .unwrap();
        assert_eq!(manifest.commands.len(), 2);
        assert_eq!(manifest.commands[0].name, "chief.aws_export");
        assert!(!manifest.commands[0].confirm);
        assert!(manifest.commands[1].confirm);
    }

    #[test]
    fn test_empty_commands_allowed() {
        let manifest = load_str("commands: []\n").unwrap();
        assert!(manifest.commands.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_load_failure() {
        let err = load_str("commands: [unterminated\n").unwrap_err();
        assert!(matches!(err, ChiefError::UnitLoadFailed { .. }));
    }

    #[test]
    fn test_empty_command_name_rejected() {
        let err = load_str("commands:\n  - name: \"\"\n    run: echo hi\n").unwrap_err();
        assert!(err.to_string().contains("empty name"));
    }

    #[test]
    fn test_whitespace_in_name_rejected() {
        let err = load_str("commands:\n  - name: \"chief. bad\"\n    run: echo hi\n").unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn test_empty_run_rejected() {
        let err = load_str("commands:\n  - name: chief.x\n    run: \"\"\n").unwrap_err();
        assert!(err.to_string().contains("empty run line"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = load_str("commands: []\nextra_field: 1\n").unwrap_err();
        assert!(matches!(err, ChiefError::UnitLoadFailed { .. }));
    }
}
