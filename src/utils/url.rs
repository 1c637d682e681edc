//! Site URL normalization.
//!
//! `site-url:` references are normalized against the configured origin and
//! path prefix:
//!
//! | Input                 | `absolute = false` | `absolute = true`                   |
//! |-----------------------|--------------------|-------------------------------------|
//! | `/about/`             | `/blog/about/`     | `https://example.com/blog/about/`   |
//! | `about/`              | `/blog/about/`     | `https://example.com/blog/about/`   |
//! | `https://other.org/x` | unchanged          | unchanged                           |
//!
//! (with `base.url = "https://example.com"` and `build.path_prefix = "blog"`)

use crate::config::SiteConfig;
use crate::jsonld::UrlNormalizer;

/// URL normalizer built from the site configuration.
#[derive(Debug, Clone, Default)]
pub struct SiteUrls {
    /// Origin without trailing slash (may be empty).
    origin: String,
    /// Path prefix as `/prefix`, or empty.
    prefix: String,
}

impl SiteUrls {
    pub fn new(origin: &str, path_prefix: &str) -> Self {
        let prefix = path_prefix.trim_matches('/');
        Self {
            origin: origin.trim_end_matches('/').to_owned(),
            prefix: if prefix.is_empty() {
                String::new()
            } else {
                format!("/{prefix}")
            },
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.base.origin(), &config.build.path_prefix)
    }

    /// Join `path` under the path prefix, keeping an already-prefixed path as is.
    fn prefixed(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };

        if self.prefix.is_empty() || has_path_prefix(&path, &self.prefix) {
            path
        } else {
            format!("{}{path}", self.prefix)
        }
    }
}

impl UrlNormalizer for SiteUrls {
    fn normalize_url(&self, path: &str, absolute: bool) -> String {
        if is_external(path) {
            return path.to_owned();
        }
        let path = self.prefixed(path);
        if absolute {
            format!("{}{path}", self.origin)
        } else {
            path
        }
    }
}

/// Whether `path` already names a location outside the site's path space.
fn is_external(path: &str) -> bool {
    path.starts_with("//") || path.contains("://")
}

/// Whether `path` is `prefix` itself or lies below it.
fn has_path_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}
