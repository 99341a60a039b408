// File: src/config.rs
// Purpose: Configuration parsing from vista.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vista_router::{PathBase, RouteDeclaration};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VistaConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    /// Declarative route table
    #[serde(default)]
    pub views: Vec<ViewConfig>,
}

/// Where the application is reachable, used for absolute links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Mount points and template location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Application mount path (e.g., "/app")
    #[serde(default)]
    pub context_path: String,

    /// Servlet mount path below the application (e.g., "/view")
    #[serde(default)]
    pub servlet_path: String,

    /// Prefix of the rendered template paths (default: "/WEB-INF/jsp/")
    #[serde(default = "default_template_prefix")]
    pub template_prefix: String,
}

/// One `[[views]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub pattern: String,

    /// Handler identifier, also the source of the derived view name
    pub handler: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub signature: Option<Vec<String>>,

    #[serde(default)]
    pub qualifier: Option<String>,
}

// Default values
fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_template_prefix() -> String {
    "/WEB-INF/jsp/".to_string()
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            context_path: String::new(),
            servlet_path: String::new(),
            template_prefix: default_template_prefix(),
        }
    }
}

impl ServerConfig {
    /// `scheme://host[:port]`, without the default port of the scheme
    pub fn server_url(&self) -> String {
        PathBase::server_url(&self.scheme, &self.host, self.port)
    }
}

impl ViewConfig {
    /// Turns this entry into a route declaration for `handler`
    pub fn declaration<H>(&self, handler: H) -> RouteDeclaration<H> {
        let mut decl = RouteDeclaration::new(&self.pattern, &self.handler, handler);
        if let Some(name) = &self.name {
            decl = decl.with_name(name);
        }
        if let Some(signature) = &self.signature {
            decl = decl.with_signature(signature.iter().cloned());
        }
        if let Some(qualifier) = &self.qualifier {
            decl = decl.with_qualifier(qualifier);
        }
        decl
    }
}

impl VistaConfig {
    /// Load configuration from vista.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./vista.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("vista.toml")
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Mount points for building links
    pub fn path_base(&self) -> PathBase {
        PathBase::new(
            self.server.server_url(),
            &self.routing.context_path,
            &self.routing.servlet_path,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = VistaConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.routing.template_prefix, "/WEB-INF/jsp/");
        assert!(config.views.is_empty());
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<VistaConfig>("").unwrap_or_default();
        assert_eq!(config.server.scheme, "http");
        assert_eq!(config.routing.context_path, "");
    }

    #[test]
    fn test_views_table() {
        let toml = r#"
            [routing]
            context_path = "/gallery"
            servlet_path = "/view"

            [[views]]
            pattern = "picture/${id}.html"
            handler = "pictureView"
            signature = ["id"]

            [[views]]
            pattern = "feed/${id}.xml"
            handler = "pictureView"
            signature = ["id"]
            qualifier = "rss"
        "#;
        let config = VistaConfig::parse(toml).unwrap();
        assert_eq!(config.routing.context_path, "/gallery");
        assert_eq!(config.views.len(), 2);
        assert_eq!(config.views[1].qualifier.as_deref(), Some("rss"));

        let decl = config.views[0].declaration(());
        assert_eq!(decl.view_name(), "picture");
        assert_eq!(decl.signature, Some(vec!["id".to_string()]));
    }

    #[test]
    fn test_path_base_omits_default_port() {
        let toml = r#"
            [server]
            scheme = "https"
            host = "example.com"
            port = 443
        "#;
        let config = VistaConfig::parse(toml).unwrap();
        assert_eq!(config.path_base().server_url_str(), "https://example.com");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = VistaConfig::load("does/not/exist/vista.toml").unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
