mod commands;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vista_router::PathType;

#[derive(Parser)]
#[command(name = "vista")]
#[command(version, about = "Vista CLI - inspect and exercise a view route table", long_about = None)]
struct Cli {
    /// Configuration file with the [[views]] table
    #[arg(short, long, global = true, default_value = "vista.toml")]
    config: PathBuf,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all routes in matching order
    Routes,

    /// Show which view a request path resolves to
    Match {
        /// Request path, e.g. /picture/12.html
        path: String,
    },

    /// Build a link from field values
    Build {
        /// View name; without it the route is chosen by the signature of the fields
        #[arg(long)]
        view: Option<String>,

        /// Qualifier of the view variant
        #[arg(short, long)]
        qualifier: Option<String>,

        /// Field value as name=value (repeatable)
        #[arg(short, long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,

        /// Variable value as name=value (repeatable), referenced as #name
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,

        /// Representation of the link
        #[arg(short = 't', long = "type", default_value = "view")]
        link_type: LinkType,
    },

    /// Validate the route table
    Check,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LinkType {
    /// Bare path as generated by the route
    View,
    /// Prefixed with context and servlet path
    Relative,
    /// Prefixed with the server URL as well
    Absolute,
}

impl From<LinkType> for PathType {
    fn from(link_type: LinkType) -> Self {
        match link_type {
            LinkType::View => PathType::View,
            LinkType::Relative => PathType::Relative,
            LinkType::Absolute => PathType::Absolute,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{}'", s))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Execute command
    match cli.command {
        Commands::Routes => {
            commands::routes::execute(&cli.config)?;
        }
        Commands::Match { path } => {
            commands::matching::execute(&cli.config, &path)?;
        }
        Commands::Build {
            view,
            qualifier,
            fields,
            vars,
            link_type,
        } => {
            commands::build::execute(
                &cli.config,
                commands::build::BuildRequest {
                    view,
                    qualifier,
                    fields,
                    vars,
                    path_type: link_type.into(),
                },
            )?;
        }
        Commands::Check => {
            commands::check::execute(&cli.config)?;
        }
    }

    Ok(())
}
