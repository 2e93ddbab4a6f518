//! Command entry points
//!
//! Each submodule exposes a thin `run` function: build the engine or
//! manager for the subsystem, drive it, render the outcome.

pub mod completions;
pub mod config;
pub mod exec;
pub mod list;
pub mod reload;
pub mod sync;
pub mod version;

use crate::compose::{Composition, SyncOutcome};
use crate::unit::LoadState;
use crate::ui;

/// Render a composition report: diagnostics, sync outcome, units,
/// collisions, then a one-line summary.
pub(crate) fn render_report(composition: &Composition) {
    let report = &composition.report;

    for diag in &report.diagnostics {
        println!("{}", ui::dim(diag));
    }

    match &report.sync {
        SyncOutcome::Skipped { reason } => {
            if !reason.starts_with("local plugins") {
                println!("{} sync skipped: {}", ui::dim("·"), reason);
            }
        }
        SyncOutcome::Attempted(decision) => {
            println!("{} sync: {}", ui::success("·"), decision.describe());
        }
        SyncOutcome::Failed(reason) => {
            println!("{} sync failed: {}", ui::warn("!"), reason);
        }
    }

    let mut failed = 0usize;
    for unit in &report.units {
        match &unit.load_state {
            LoadState::Loaded => {
                println!(
                    "{} {} {}",
                    ui::success("✓"),
                    unit.name,
                    ui::dim(&format!("({})", unit.origin.label()))
                );
            }
            LoadState::Failed(reason) => {
                failed += 1;
                println!(
                    "{} {} {}: {}",
                    ui::failure("✗"),
                    unit.name,
                    ui::dim(&format!("({})", unit.origin.label())),
                    reason
                );
            }
            LoadState::Unloaded => {}
        }
    }

    for collision in composition.session.collisions() {
        println!(
            "{} name collision on '{}': kept {}, rejected {}",
            ui::warn("!"),
            collision.name,
            collision.winner,
            collision.loser
        );
    }

    let summary = format!(
        "Composed {} unit(s) ({} failed), {} command(s), {} alias(es)",
        report.units.len(),
        failed,
        composition.session.commands().len(),
        composition.session.aliases().len()
    );
    println!("{}", ui::bold(&summary));
}
