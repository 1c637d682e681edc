//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn path_prefix() -> String {
        String::new()
    }
}

// ============================================================================
// [jsonld] Section Defaults
// ============================================================================

pub mod jsonld {
    pub fn context() -> String {
        "https://schema.org".into()
    }

    pub fn key() -> String {
        "jsonLd".into()
    }

    pub const fn max_depth() -> usize {
        32
    }
}
