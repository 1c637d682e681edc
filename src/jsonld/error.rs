//! Structured-data resolution errors.
//!
//! Every variant is fatal for the page being resolved: emitting partial or
//! silently-wrong linked data is worse than failing the build.

use thiserror::Error;

/// Resolution-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown filter `{name}`")]
    UnknownFilter { name: String },

    #[error("`{path}` not found in page data")]
    NotFound { path: String },

    #[error("cannot read `{segment}` of `{path}`: parent is not an object")]
    NotAnObject { path: String, segment: String },

    #[error("filter `{filter}` expects a {expected}, found a {found}")]
    FilterType {
        filter: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("reference `{path}` nests deeper than {depth} levels (cyclic reference?)")]
    CyclicReference { path: String, depth: usize },
}
