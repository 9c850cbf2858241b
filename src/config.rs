//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. Configuration is flat — one
//! file, no cascade — because everything here describes a single deployment:
//! which content store to query and where to bind the server.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [content]
//! project_id = "4qydhzw9"      # Content store project
//! dataset = "production"       # Dataset within the project
//! api_version = "2024-01-01"   # Query API version (date-pinned)
//! use_cdn = false              # Query the CDN edge instead of the live API
//!
//! [server]
//! bind = "127.0.0.1:8080"      # Listen address for `serve`
//!
//! [site]
//! title = "Foundation Collective"
//! contact_email = ""           # Footer fallback when the home document has none
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only point at a different dataset
//! [content]
//! dataset = "staging"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have working defaults pointing at the production content
/// store. User config files need only specify the values they want to
/// override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content store connection settings.
    pub content: ContentStoreConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Site chrome settings (title, contact fallback).
    pub site: SiteMeta,
}

impl SiteConfig {
    /// Load from a TOML file, falling back to defaults when the file does
    /// not exist. A present-but-invalid file is an error, never silently
    /// ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.project_id.is_empty() {
            return Err(ConfigError::Validation(
                "content.project_id must not be empty".into(),
            ));
        }
        if self.content.dataset.is_empty() {
            return Err(ConfigError::Validation(
                "content.dataset must not be empty".into(),
            ));
        }
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind is not a valid socket address: {}",
                self.server.bind
            )));
        }
        Ok(())
    }
}

/// Connection settings for the hosted content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentStoreConfig {
    /// Project identifier, part of the API hostname.
    pub project_id: String,
    /// Dataset within the project.
    pub dataset: String,
    /// Date-pinned query API version.
    pub api_version: String,
    /// Query the CDN edge (`apicdn`) instead of the live API host.
    /// The live API returns uncached results; the CDN may lag writes.
    pub use_cdn: bool,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            project_id: "4qydhzw9".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: false,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address for the `serve` subcommand.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Site chrome settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Site title, shown in the header and page titles.
    pub title: String,
    /// Footer contact fallback when the home document carries no email.
    pub contact_email: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Foundation Collective".to_string(),
            contact_email: String::new(),
        }
    }
}

/// A documented stock `site.toml` with every option at its default,
/// printable via the `gen-config` subcommand.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    format!(
        r#"# Foundation Collective site configuration.
# All options are optional; defaults shown.

[content]
# Content store project and dataset to query.
project_id = "{project_id}"
dataset = "{dataset}"
# Date-pinned query API version.
api_version = "{api_version}"
# true  -> query the CDN edge (cached, may lag writes)
# false -> query the live API (uncached)
use_cdn = {use_cdn}

[server]
# Listen address for `foundation-collective serve`.
bind = "{bind}"

[site]
# Shown in the header and page titles.
title = "{title}"
# Footer contact fallback when the home document has no email.
contact_email = ""
"#,
        project_id = defaults.content.project_id,
        dataset = defaults.content.dataset,
        api_version = defaults.content.api_version,
        use_cdn = defaults.content.use_cdn,
        bind = defaults.server.bind,
        title = defaults.site.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load(&dir.path().join("site.toml")).unwrap();
        assert_eq!(config.content.dataset, "production");
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn partial_file_overrides_only_named_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "[content]\ndataset = \"staging\"\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.content.dataset, "staging");
        // Untouched sections keep their defaults
        assert_eq!(config.content.api_version, "2024-01-01");
        assert_eq!(config.site.title, "Foundation Collective");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "[content]\ndatset = \"typo\"\n").unwrap();

        assert!(matches!(SiteConfig::load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_bind_address_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "[server]\nbind = \"not-an-address\"\n").unwrap();

        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_project_id_fails_validation() {
        let config = SiteConfig {
            content: ContentStoreConfig {
                project_id: String::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_and_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(&stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.content.project_id, defaults.content.project_id);
        assert_eq!(parsed.server.bind, defaults.server.bind);
        parsed.validate().unwrap();
    }
}
