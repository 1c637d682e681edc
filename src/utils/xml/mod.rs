//! XML/HTML processing utilities.

pub mod common;
pub mod head;

pub use head::insert_ld_json;
