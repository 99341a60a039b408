// File: src/table.rs
// Purpose: Load the [[views]] table into a route registry

use anyhow::{bail, Context, Result};
use std::path::Path;
use vista::VistaConfig;
use vista_router::{RegistryBuilder, RouteRegistry};

/// Route registry whose handlers are the handler identifiers of the table
pub type ViewTable = RouteRegistry<String>;

pub fn load(config_path: &Path) -> Result<(VistaConfig, ViewTable)> {
    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let config = VistaConfig::load(config_path)?;
    let table = registry(&config)?;
    tracing::debug!("Loaded {} routes from {}", table.len(), config_path.display());
    Ok((config, table))
}

pub fn registry(config: &VistaConfig) -> Result<ViewTable> {
    let mut builder = RegistryBuilder::new();
    for (index, view) in config.views.iter().enumerate() {
        builder
            .register(view.declaration(view.handler.clone()))
            .with_context(|| format!("View #{} ({}) is invalid", index + 1, view.pattern))?;
    }
    Ok(builder.build())
}
