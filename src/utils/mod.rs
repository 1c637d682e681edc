//! Utility modules shared by the page pipeline.

pub mod url;
pub mod xml;
