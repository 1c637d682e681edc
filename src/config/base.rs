//! `[base]` section configuration.
//!
//! Contains the site origin used for absolute URLs.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in ldmeta.toml - site origin.
///
/// # Example
/// ```toml
/// [base]
/// url = "https://myblog.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Base URL for `site-url:` references.
    /// Without it, absolute URLs degrade to root-relative paths.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,
}

impl BaseConfig {
    /// Base URL without trailing slash, empty when unset.
    pub fn origin(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }
}
