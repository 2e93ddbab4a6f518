//! List command: discovered units or the registered command table

use crate::cli::ListArgs;
use crate::compose::Composer;
use crate::error::Result;
use crate::paths::ChiefPaths;
use crate::ui;
use crate::unit::LoadState;

pub fn run(paths: ChiefPaths, verbose: bool, args: ListArgs) -> Result<()> {
    let mut composer = Composer::new(paths, verbose);
    let composition = composer.compose()?;

    let show_units = args.units || !args.commands;

    if args.commands {
        println!("{}", ui::bold("Commands:"));
        for (name, entry) in composition.session.commands() {
            let summary = entry
                .spec
                .summary
                .as_deref()
                .map(|s| format!(" — {s}"))
                .unwrap_or_default();
            println!(
                "  {} {}{}",
                name,
                ui::dim(&format!("[{}]", entry.unit)),
                ui::dim(&summary)
            );
        }
        if !composition.session.aliases().is_empty() {
            println!("{}", ui::bold("Aliases:"));
            for (alias, entry) in composition.session.aliases() {
                println!("  {} {} {}", alias, ui::dim("->"), entry.spec.name);
            }
        }
    }

    if !show_units {
        return Ok(());
    }

    println!("{}", ui::bold("Units:"));
    for unit in &composition.report.units {
        let state = match &unit.load_state {
            LoadState::Loaded => ui::success("loaded"),
            LoadState::Failed(reason) => ui::failure(&format!("failed: {reason}")),
            LoadState::Unloaded => ui::dim("unloaded"),
        };
        println!(
            "  {} {} {}",
            unit.name,
            ui::dim(&format!("({})", unit.origin.label())),
            state
        );
    }
    Ok(())
}
