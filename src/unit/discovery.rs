//! Unit discovery
//!
//! Scans one directory level for files carrying the fixed unit suffix and
//! returns them ordered lexicographically by filename. That ordering is the
//! documented load-order mechanism: prefix a unit file with an ordering
//! marker (e.g. `00_`) to force precedence. Never mutates the filesystem.

use std::path::Path;

use walkdir::WalkDir;

use crate::unit::{UNIT_SUFFIX, Unit, UnitOrigin};

/// Discover units in `dir`.
///
/// A missing directory yields an empty list; the caller decides whether
/// that is fatal (it is for the core units directory only).
pub fn discover_units(dir: &Path, origin: UnitOrigin) -> Vec<Unit> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut units: Vec<Unit> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let file_name = e.file_name().to_str()?.to_string();
            let name = file_name.strip_suffix(UNIT_SUFFIX)?;
            if name.is_empty() {
                return None;
            }
            Some(Unit::new(name.to_string(), e.into_path(), origin))
        })
        .collect();

    units.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    units
}
