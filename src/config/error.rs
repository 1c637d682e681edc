//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or validating `ldmeta.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid ldmeta.toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("[base.url] must start with http:// or https://, found `{0}`")]
    BaseUrl(String),

    #[error("[jsonld.key] must not be empty")]
    EmptyKey,

    #[error("[jsonld.max_depth] must be at least 1")]
    ZeroDepth,
}
