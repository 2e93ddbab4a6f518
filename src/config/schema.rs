//! Built-in configuration schema template
//!
//! The template is the single source of truth for recognized keys: their
//! defaults, their documentation comments, and the old names they migrated
//! from. `chief config init` renders it into a fresh file and the
//! reconciler diffs it against an existing one.

/// Bumped whenever an entry is added or renamed.
pub const SCHEMA_VERSION: &str = "3";

/// Default value of a schema key, typed the way the file format spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// Unquoted `true`/`false`
    Bool(bool),
    /// Quoted string or path
    Str(&'static str),
}

impl DefaultValue {
    /// Spell the default the way it appears on an entry's right-hand side
    pub fn render(&self) -> String {
        match self {
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::Str(s) => format!("\"{s}\""),
        }
    }
}

/// One template key
#[derive(Debug, Clone, Copy)]
pub struct SchemaEntry {
    pub key: &'static str,
    pub default: DefaultValue,
    /// Documentation comment written above the entry when appended
    pub doc: &'static [&'static str],
    /// Previous name this key migrated from, if any
    pub rename_from: Option<&'static str>,
}

/// The shipped template, in file order
pub const TEMPLATE: &[SchemaEntry] = &[
    SchemaEntry {
        key: "CHIEF_CFG_PLUGINS_TYPE",
        default: DefaultValue::Str("local"),
        doc: &[
            "Where user plugins come from: \"local\" for a plain directory,",
            "\"remote\" for a git-backed working copy.",
        ],
        rename_from: None,
    },
    SchemaEntry {
        key: "CHIEF_CFG_PLUGINS_PATH",
        default: DefaultValue::Str("~/chief_plugins"),
        doc: &["Directory scanned for user plugin units."],
        rename_from: Some("CHIEF_CFG_PLUGINS_ROOT"),
    },
    SchemaEntry {
        key: "CHIEF_CFG_PLUGINS_GIT_REPO",
        default: DefaultValue::Str(""),
        doc: &["Git URL of the remote plugins repository (remote type only)."],
        rename_from: None,
    },
    SchemaEntry {
        key: "CHIEF_CFG_PLUGINS_GIT_BRANCH",
        default: DefaultValue::Str("main"),
        doc: &["Tracked branch of the remote plugins repository."],
        rename_from: None,
    },
    SchemaEntry {
        key: "CHIEF_CFG_PLUGINS_GIT_AUTOUPDATE",
        default: DefaultValue::Bool(false),
        doc: &[
            "Pull the remote plugins repository during composition.",
            "Local uncommitted changes always block the pull.",
        ],
        rename_from: Some("CHIEF_CFG_PLUGINS_AUTOUPDATE"),
    },
    SchemaEntry {
        key: "CHIEF_CFG_ALIAS",
        default: DefaultValue::Str(""),
        doc: &[
            "Optional short prefix for chief.* commands, e.g. \"cf\" makes",
            "cf.whoami an alias of chief.whoami. Canonical names stay available.",
        ],
        rename_from: None,
    },
    SchemaEntry {
        key: "CHIEF_CFG_VERBOSE",
        default: DefaultValue::Bool(false),
        doc: &["Print per-unit diagnostics while composing the session."],
        rename_from: None,
    },
    SchemaEntry {
        key: "CHIEF_CFG_HINTS",
        default: DefaultValue::Bool(true),
        doc: &["Show usage hints, e.g. when remote plugin updates are available."],
        rename_from: None,
    },
    SchemaEntry {
        key: "CHIEF_CFG_CONFIG_BACKUP",
        default: DefaultValue::Bool(true),
        doc: &["Keep a timestamped backup before 'chief config update' rewrites this file."],
        rename_from: None,
    },
];

/// Render the full template as a fresh configuration file
pub fn render_template() -> String {
    let mut out = String::new();
    out.push_str("# Chief configuration\n");
    out.push_str(&format!("# Schema version {SCHEMA_VERSION}\n"));
    for entry in TEMPLATE {
        out.push('\n');
        for line in entry.doc {
            out.push_str(&format!("# {line}\n"));
        }
        out.push_str(&format!("{}={}\n", entry.key, entry.default.render()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::ConfigFile;
    use std::path::Path;

    #[test]
    fn test_template_keys_are_unique() {
        let mut keys: Vec<&str> = TEMPLATE.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), TEMPLATE.len());
    }

    #[test]
    fn test_rename_sources_never_collide_with_current_keys() {
        for entry in TEMPLATE {
            if let Some(old) = entry.rename_from {
                assert!(TEMPLATE.iter().all(|e| e.key != old), "{old} is live");
            }
        }
    }

    #[test]
    fn test_rendered_template_parses() {
        let rendered = render_template();
        let file = ConfigFile::parse(Path::new("/t"), &rendered).unwrap();
        for entry in TEMPLATE {
            assert!(file.contains_key(entry.key), "{} missing", entry.key);
        }
        assert_eq!(file.bool_value("CHIEF_CFG_HINTS"), Some(true));
        assert_eq!(
            file.str_value("CHIEF_CFG_PLUGINS_GIT_BRANCH"),
            Some("main".to_string())
        );
    }
}
