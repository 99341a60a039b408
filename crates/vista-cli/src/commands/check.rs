use crate::table;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn execute(config_path: &Path) -> Result<()> {
    let (config, table) = table::load(config_path)?;

    let with_signature = table
        .routes()
        .iter()
        .filter(|route| route.signature().is_some())
        .count();

    println!("{}", "✓ Route table is valid".green().bold());
    println!("Views:      {}", table.names().len());
    println!("Routes:     {}", table.len());
    println!("Signatures: {}", with_signature);
    println!("Links:      {}", config.path_base().apply("/", vista_router::PathType::Absolute));

    Ok(())
}
