use crate::table;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vista_router::Router;

pub fn execute(config_path: &Path, path: &str) -> Result<()> {
    let (_, table) = table::load(config_path)?;
    let router = Router::new(table);

    let Some(found) = router.match_path(path) else {
        println!("{} {}", "No view for".red(), path);
        return Ok(());
    };

    println!("{} {}", "Matched".green().bold(), found.route.pattern());
    println!("View:      {}", found.route.name().cyan());
    println!("Handler:   {}", found.handler());
    if let Some(qualifier) = found.qualifier() {
        println!("Qualifier: {}", qualifier.magenta());
    }

    let mut params: Vec<_> = found.params.iter().collect();
    params.sort();
    for (name, value) in params {
        println!("  {} = {:?}", name, value);
    }

    Ok(())
}
