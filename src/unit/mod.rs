//! Plugin units: the discoverable, loadable bundles of commands
//!
//! A unit is a single file named `<name>_chief-plugin.yaml`. The file is
//! data implementing a registration contract (a manifest of commands), never
//! code that gets evaluated. Within one composition pass the discovered list
//! is immutable; a reload rediscovers from scratch.

pub mod discovery;
pub mod manifest;

use std::path::PathBuf;

pub use manifest::{CommandSpec, UnitManifest};

/// Fixed filename suffix that marks a unit file
pub const UNIT_SUFFIX: &str = "_chief-plugin.yaml";

/// Where a unit was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOrigin {
    Core,
    UserLocal,
    UserRemote,
}

impl UnitOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            UnitOrigin::Core => "core",
            UnitOrigin::UserLocal => "user-local",
            UnitOrigin::UserRemote => "user-remote",
        }
    }
}

/// Load outcome of a unit within one composition pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
    Failed(String),
}

/// A discovered unit
#[derive(Debug, Clone)]
pub struct Unit {
    /// Filename prefix before the fixed suffix
    pub name: String,
    pub path: PathBuf,
    pub origin: UnitOrigin,
    pub load_state: LoadState,
}

impl Unit {
    pub fn new(name: String, path: PathBuf, origin: UnitOrigin) -> Self {
        Self {
            name,
            path,
            origin,
            load_state: LoadState::Unloaded,
        }
    }
}
