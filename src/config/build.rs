//! `[build]` section configuration.
//!
//! Contains the project root and the URL path prefix.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in ldmeta.toml.
///
/// # Example
/// ```toml
/// [build]
/// path_prefix = "blog"     # site served from /blog/
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// URL path prefix for subdirectory deployment (e.g., "blog" → `/blog/...`).
    #[serde(default = "defaults::build::path_prefix")]
    #[educe(Default = defaults::build::path_prefix())]
    pub path_prefix: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.root, None);
        assert_eq!(config.build.path_prefix, "");
    }

    #[test]
    fn test_build_config_path_prefix() {
        let config = r#"
            [build]
            path_prefix = "blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.path_prefix, "blog");
    }

    #[test]
    fn test_build_unknown_field_rejection() {
        let config = r#"
            [build]
            minify = true
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
