//! Structured-data (JSON-LD) resolution engine.
//!
//! Authors declare a metadata tree per page, mixing literals with reference
//! strings. Each page's tree is resolved once before its HTML is finalized,
//! then wrapped with `@context`, serialized, and injected after rendering.
//!
//! # Architecture
//!
//! ```text
//! declared tree (Value)
//!     │
//!     └── Resolver::resolve() ──┬── reference::classify()
//!                               ├── extract::extract()
//!                               └── FilterRegistry::apply()
//!                                       │
//!                                       ▼
//!                          resolved tree (serde_json::Value)
//!                                       │
//!                                       ▼
//!                          wrap() ──► serialize() ──► <script type="application/ld+json">
//! ```
//!
//! The engine does no I/O and keeps no state between pages.

mod error;
mod extract;
mod filter;
mod reference;
mod resolve;
mod value;
mod wrap;

pub use filter::FilterRegistry;
pub use resolve::{PageContext, Resolver, UrlNormalizer};
pub use value::Value;
pub use wrap::{script_safe, serialize, wrap};
