//! `[jsonld]` section configuration.
//!
//! Controls how declared structured data is found, resolved and wrapped.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[jsonld]` section in ldmeta.toml.
///
/// # Example
/// ```toml
/// [jsonld]
/// context = "https://schema.org"
/// key = "jsonLd"
/// max_depth = 32
/// pretty = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct JsonLdConfig {
    /// Value of the `@context` key added to every top-level object.
    #[serde(default = "defaults::jsonld::context")]
    #[educe(Default = defaults::jsonld::context())]
    pub context: String,

    /// Page data key holding the declared metadata tree.
    #[serde(default = "defaults::jsonld::key")]
    #[educe(Default = defaults::jsonld::key())]
    pub key: String,

    /// Maximum chain of data references resolving into further references.
    #[serde(default = "defaults::jsonld::max_depth")]
    #[educe(Default = defaults::jsonld::max_depth())]
    pub max_depth: usize,

    /// Pretty-print JSON printed by `ldmeta resolve`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub pretty: bool,
}
