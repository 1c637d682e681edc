//! Site configuration management for `ldmeta.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site origin for absolute URLs                    |
//! | `[build]`   | Project root, URL path prefix                    |
//! | `[jsonld]`  | `@context`, declared-tree key, depth bound       |
//! | `[data]`    | Site-wide data visible to every page             |
//!
//! # Example
//!
//! ```toml
//! [base]
//! url = "https://example.com"
//!
//! [build]
//! path_prefix = "blog"
//!
//! [jsonld]
//! context = "https://schema.org"
//!
//! [data.config.me]
//! name = "Alice"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod jsonld;

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use jsonld::JsonLdConfig;

use crate::cli::Cli;
use crate::jsonld::{FilterRegistry, Resolver, Value};
use crate::log;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing ldmeta.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site origin
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Structured data settings
    #[serde(default)]
    pub jsonld: JsonLdConfig,

    /// Site-wide data merged under every page's own data
    #[serde(default)]
    pub data: toml::Table,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Anchor a relative input or output path at the project root.
    pub fn root_join(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.get_root().join(path)
        }
    }

    /// Site-wide data as a page data tree.
    pub fn site_data(&self) -> Value {
        Value::from(toml::Value::Table(self.data.clone()))
    }

    /// Resolver with the built-in filters and the configured depth bound.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(FilterRegistry::builtin(), self.jsonld.max_depth)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);

        if let Some(base_url) = &cli.base_url {
            self.base.url = Some(base_url.clone());
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match &self.base.url {
            Some(base_url) if !base_url.starts_with("http") => {
                bail!(ConfigError::BaseUrl(base_url.clone()));
            }
            Some(_) => {}
            None => {
                log!("config"; "[base.url] is not set, `site-url:` references resolve to root-relative paths");
            }
        }

        if self.jsonld.key.is_empty() {
            bail!(ConfigError::EmptyKey);
        }

        if self.jsonld.max_depth == 0 {
            bail!(ConfigError::ZeroDepth);
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [base]
            url = "https://example.com"
        "#;
        let result = SiteConfig::from_str(config_str);

        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.base.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [base
            url = "https://example.com"
        "#;
        let err = SiteConfig::from_str(invalid_config).unwrap_err();

        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Toml(_))));
        // The parser's location detail is part of the message
        let message = err.to_string();
        assert!(message.starts_with("invalid ldmeta.toml:"));
        assert!(message.contains("TOML parse error at line"));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[base]\nurl = \"https://example.com\"").unwrap();

        let config = SiteConfig::from_path(file.path()).unwrap();
        assert_eq!(config.base.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/ldmeta.toml")).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Io(..))));
        assert!(err.to_string().contains("/nonexistent/ldmeta.toml"));
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_root_join() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("site"));

        assert_eq!(
            config.root_join(Path::new("pages/a.toml")),
            Path::new("site/pages/a.toml")
        );
        assert_eq!(
            config.root_join(Path::new("/tmp/out.html")),
            Path::new("/tmp/out.html")
        );
    }

    #[test]
    fn test_site_data() {
        let config = r#"
            [data]
            site = "Example"

            [data.config.me]
            name = "Alice"
            links = ["https://a.example", "https://b.example"]
        "#;
        let config = SiteConfig::from_str(config).unwrap();
        let data = config.site_data();

        assert_eq!(data.get("site"), Some(&Value::from("Example")));
        assert_eq!(
            data.get("config")
                .and_then(|c| c.get("me"))
                .and_then(|me| me.get("name")),
            Some(&Value::from("Alice"))
        );
    }

    #[test]
    fn test_site_data_empty_by_default() {
        let config = SiteConfig::default();
        assert_eq!(config.site_data(), Value::default());
    }

    #[test]
    fn test_validate_default() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_base_url() {
        let config = SiteConfig::from_str("[base]\nurl = \"example.com\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::BaseUrl(url)) if url == "example.com"));
        assert!(err.to_string().contains("[base.url]"));
    }

    #[test]
    fn test_validate_empty_key() {
        let config = SiteConfig::from_str("[jsonld]\nkey = \"\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::EmptyKey)));
    }

    #[test]
    fn test_validate_zero_depth() {
        let config = SiteConfig::from_str("[jsonld]\nmax_depth = 0").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::ZeroDepth)));
        assert_eq!(err.to_string(), "[jsonld.max_depth] must be at least 1");
    }

    #[test]
    fn test_resolver_uses_configured_depth() {
        let config = SiteConfig::from_str("[jsonld]\nmax_depth = 2").unwrap();
        let data = Value::from(serde_json::json!({ "a": "lume-data:a" }));
        let urls = |path: &str, _: bool| path.to_owned();
        let ctx = crate::jsonld::PageContext::new(&data, "/", &urls);

        let err = config
            .resolver()
            .resolve(&Value::from("lume-data:a"), &ctx)
            .unwrap_err();
        assert!(err.to_string().contains("2 levels"));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [unknown_section]
            field = "value"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [base]
            url = "https://myblog.com"

            [build]
            path_prefix = "blog"

            [jsonld]
            context = "https://schema.org"
            key = "jsonLd"
            max_depth = 8

            [data]
            analytics_id = "UA-12345"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.origin(), "https://myblog.com");
        assert_eq!(config.build.path_prefix, "blog");
        assert_eq!(config.jsonld.max_depth, 8);
        assert!(config.data.contains_key("analytics_id"));
    }
}
