//! Flat `KEY=value` configuration file with comment preservation
//!
//! The format is positional text, not a serde format: comments and blank
//! lines are kept verbatim and entries keep their original spelling until
//! explicitly rewritten. The right-hand side of an entry is stored as raw
//! text so unknown keys and unrecognized value shapes round-trip unchanged;
//! interpretation (bool, quoted string) happens lazily through accessors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChiefError, Result};

/// One physical line of the configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A `#` comment, stored verbatim
    Comment(String),
    /// An empty (or whitespace-only) line
    Blank,
    /// A `KEY=value` entry; `value` is the raw right-hand text
    Entry { key: String, value: String },
}

/// Parsed configuration file, order-preserving
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    lines: Vec<Line>,
}

fn valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl ConfigFile {
    /// Read and parse the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChiefError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| ChiefError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &content)
    }

    /// Parse configuration text; validates syntax and key uniqueness
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut lines = Vec::new();
        let mut seen: Vec<String> = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let lineno = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                lines.push(Line::Blank);
                continue;
            }
            if trimmed.starts_with('#') {
                lines.push(Line::Comment(raw.to_string()));
                continue;
            }

            let Some(eq) = raw.find('=') else {
                return Err(ChiefError::ConfigParseError {
                    path: path.display().to_string(),
                    line: lineno,
                    reason: format!("expected KEY=value, got '{trimmed}'"),
                });
            };
            let key = raw[..eq].trim().to_string();
            let value = raw[eq + 1..].to_string();

            if !valid_key(&key) {
                return Err(ChiefError::ConfigParseError {
                    path: path.display().to_string(),
                    line: lineno,
                    reason: format!("invalid key '{key}'"),
                });
            }
            if seen.iter().any(|k| k == &key) {
                return Err(ChiefError::ConfigParseError {
                    path: path.display().to_string(),
                    line: lineno,
                    reason: format!("duplicate key {key}"),
                });
            }
            seen.push(key.clone());
            lines.push(Line::Entry { key, value });
        }

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Path this file was loaded from (or will be saved to)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines in file order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Raw right-hand text for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|l| match l {
            Line::Entry { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Interpret a key as a boolean (`true`/`false`, unquoted)
    pub fn bool_value(&self, key: &str) -> Option<bool> {
        match self.get(key).map(str::trim) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }

    /// Interpret a key as a string, stripping one level of double quotes
    pub fn str_value(&self, key: &str) -> Option<String> {
        let raw = self.get(key)?.trim();
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(raw);
        Some(unquoted.to_string())
    }

    /// Rename `old` to `new` in place, keeping position and value text.
    ///
    /// Returns false if `old` is absent or `new` already exists.
    pub fn rename_key(&mut self, old: &str, new: &str) -> bool {
        if self.contains_key(new) {
            return false;
        }
        for line in &mut self.lines {
            if let Line::Entry { key, .. } = line {
                if key == old {
                    *key = new.to_string();
                    return true;
                }
            }
        }
        false
    }

    /// Append a documented entry at the end of the file
    pub fn append_entry(&mut self, doc: &[&str], key: &str, value: &str) {
        if !matches!(self.lines.last(), Some(Line::Blank) | None) {
            self.lines.push(Line::Blank);
        }
        for comment in doc {
            self.lines.push(Line::Comment(format!("# {comment}")));
        }
        self.lines.push(Line::Entry {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    /// Render the file back to text
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Comment(text) => out.push_str(text),
                Line::Blank => {}
                Line::Entry { key, value } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                }
            }
            out.push('\n');
        }
        out
    }

    /// Write the file atomically: stage to a temp file in the target
    /// directory, then rename into place so readers never observe a
    /// partially written configuration.
    pub fn save(&self) -> Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|e| ChiefError::ConfigWriteFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, self.render()).map_err(|e| ChiefError::ConfigWriteFailed {
            path: tmp_path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| ChiefError::ConfigWriteFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
