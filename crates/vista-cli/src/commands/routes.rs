use crate::table;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn execute(config_path: &Path) -> Result<()> {
    let (_, table) = table::load(config_path)?;

    if table.is_empty() {
        println!("{}", "No views configured".yellow());
        return Ok(());
    }

    println!("{}", "Routes in matching order:".green().bold());
    println!();

    for route in table.routes() {
        let qualifier = route
            .qualifier()
            .map(|q| format!(" [{}]", q))
            .unwrap_or_default();
        let signature = route
            .signature()
            .map(|s| format!(" {{{}}}", s))
            .unwrap_or_default();

        println!(
            "{:>5}  {}{}  {}{}",
            route.weight(),
            route.name().cyan(),
            qualifier.magenta(),
            route.pattern(),
            signature.dimmed()
        );
    }

    Ok(())
}
