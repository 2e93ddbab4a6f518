//! Explicit session state
//!
//! The session is a value, not ambient process state: the command table,
//! the alias table, the recorded name collisions, and the settings snapshot
//! the pass was composed under. The composition engine owns one
//! `SessionState` per pass and hands it to callers through the report API.
//!
//! Collision policy: the first registration wins; later registrations of
//! the same name are recorded as [`NameCollision`] rather than silently
//! replacing the handler, so precedence stays tied to the documented
//! lexicographic load order.

pub mod alias;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::unit::CommandSpec;

pub use alias::RESERVED_PREFIX;

/// A registered command: the owning unit plus the shared spec
#[derive(Debug, Clone)]
pub struct CommandEntry {
    pub unit: String,
    pub spec: Arc<CommandSpec>,
}

/// Outcome of one registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    Collision,
}

/// Two units claimed the same canonical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub name: String,
    /// Unit whose registration stands
    pub winner: String,
    /// Unit whose registration was rejected
    pub loser: String,
}

/// Composed session: commands, aliases, collisions, active settings
#[derive(Debug)]
pub struct SessionState {
    commands: BTreeMap<String, CommandEntry>,
    aliases: BTreeMap<String, CommandEntry>,
    collisions: Vec<NameCollision>,
    pub settings: Settings,
}

impl SessionState {
    pub fn new(settings: Settings) -> Self {
        Self {
            commands: BTreeMap::new(),
            aliases: BTreeMap::new(),
            collisions: Vec::new(),
            settings,
        }
    }

    /// Register a command under its canonical name. First registration wins.
    pub fn register(&mut self, unit: &str, spec: CommandSpec) -> RegisterOutcome {
        let name = spec.name.clone();
        if let Some(existing) = self.commands.get(&name) {
            self.collisions.push(NameCollision {
                name,
                winner: existing.unit.clone(),
                loser: unit.to_string(),
            });
            return RegisterOutcome::Collision;
        }
        self.commands.insert(
            name,
            CommandEntry {
                unit: unit.to_string(),
                spec: Arc::new(spec),
            },
        );
        RegisterOutcome::Registered
    }

    /// Regenerate the alias table from the canonical table.
    ///
    /// Always regenerates from scratch, so composing a pass twice can never
    /// double-define a name. With no custom prefix configured this is the
    /// identity: the alias table ends up empty and only canonical names load.
    pub fn rebuild_aliases(&mut self) {
        self.aliases.clear();
        let Some(prefix) = self.settings.alias.clone() else {
            return;
        };
        for (name, entry) in &self.commands {
            if let Some(alias) = alias::alias_name(&prefix, name) {
                self.aliases.insert(
                    alias,
                    CommandEntry {
                        unit: entry.unit.clone(),
                        spec: Arc::clone(&entry.spec),
                    },
                );
            }
        }
    }

    /// Resolve a canonical or aliased command name
    pub fn resolve(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name).or_else(|| self.aliases.get(name))
    }

    pub fn commands(&self) -> &BTreeMap<String, CommandEntry> {
        &self.commands
    }

    pub fn aliases(&self) -> &BTreeMap<String, CommandEntry> {
        &self.aliases
    }

    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use std::path::Path;

    fn settings(alias: Option<&str>) -> Settings {
        let content = match alias {
            Some(a) => format!("CHIEF_CFG_ALIAS=\"{a}\"\n"),
            None => String::new(),
        };
        let file = ConfigFile::parse(Path::new("/t"), &content).unwrap();
        Settings::from_file(&file)
    }

    fn spec(name: &str) -> CommandSpec {
        CommandSpec {
            name: name.to_string(),
            run: "true".to_string(),
            summary: None,
            confirm: false,
        }
    }

    #[test]
    fn test_no_custom_prefix_is_identity() {
        let mut session = SessionState::new(settings(None));
        session.register("core", spec("chief.whoami"));
        session.rebuild_aliases();
        assert!(session.aliases().is_empty());
        assert!(session.resolve("chief.whoami").is_some());
    }

    #[test]
    fn test_custom_prefix_adds_aliases_additively() {
        let mut session = SessionState::new(settings(Some("cf")));
        session.register("core", spec("chief.whoami"));
        session.register("core", spec("helper_fn"));
        session.rebuild_aliases();

        // both names independently invocable, same underlying spec
        let canonical = session.resolve("chief.whoami").unwrap();
        let aliased = session.resolve("cf.whoami").unwrap();
        assert!(Arc::ptr_eq(&canonical.spec, &aliased.spec));
        // non-reserved names are untouched
        assert!(session.resolve("cf.helper_fn").is_none());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut session = SessionState::new(settings(Some("cf")));
        session.register("core", spec("chief.whoami"));
        session.rebuild_aliases();
        session.rebuild_aliases();
        assert_eq!(session.aliases().len(), 1);
        assert_eq!(session.commands().len(), 1);
    }

    #[test]
    fn test_prefix_equal_to_reserved_skips_rewrite() {
        let mut session = SessionState::new(settings(Some("chief")));
        session.register("core", spec("chief.whoami"));
        session.rebuild_aliases();
        assert!(session.aliases().is_empty());
    }

    #[test]
    fn test_first_registration_wins_and_collision_recorded() {
        let mut session = SessionState::new(settings(None));
        assert_eq!(
            session.register("aws", spec("chief.export")),
            RegisterOutcome::Registered
        );
        assert_eq!(
            session.register("gcp", spec("chief.export")),
            RegisterOutcome::Collision
        );

        assert_eq!(session.resolve("chief.export").unwrap().unit, "aws");
        assert_eq!(
            session.collisions(),
            &[NameCollision {
                name: "chief.export".to_string(),
                winner: "aws".to_string(),
                loser: "gcp".to_string(),
            }]
        );
    }
}
