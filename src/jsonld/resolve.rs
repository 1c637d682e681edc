//! Reference resolution over declared structured-data trees.
//!
//! # Algorithm
//!
//! ```text
//! resolve(value)
//!     │
//!     ├── string ──► classify()
//!     │                 ├── Plain        ──► as written
//!     │                 ├── SelfUrl      ──► normalize_url(page.url, absolute)
//!     │                 ├── SiteUrl(p)   ──► normalize_url(p, absolute)
//!     │                 └── Data(path|f) ──► extract() ──► filters ──► resolve() (depth + 1)
//!     ├── date   ──► `2024-01-01T00:00:00.000Z`
//!     ├── array  ──► resolve each element
//!     └── object ──► resolve each value, keys and order kept
//! ```
//!
//! Only data references re-enter `resolve` on a value that did not come from
//! the declared tree, so they alone count towards the depth bound.

use super::error::ResolveError;
use super::extract::extract;
use super::filter::FilterRegistry;
use super::reference::{DataRef, Reference, classify};
use super::value::Value;
use crate::config::defaults;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as Json;

/// Site-wide URL normalization consumed by the resolver.
pub trait UrlNormalizer: Send + Sync {
    /// Normalize a site path; `absolute` adds the site origin.
    fn normalize_url(&self, path: &str, absolute: bool) -> String;
}

impl<F> UrlNormalizer for F
where
    F: Fn(&str, bool) -> String + Send + Sync,
{
    fn normalize_url(&self, path: &str, absolute: bool) -> String {
        self(path, absolute)
    }
}

/// Read-only view of one page, the root of every lookup.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    /// Page data, the root for `lume-data:` paths.
    pub data: &'a Value,
    /// The page's own URL path.
    pub url: &'a str,
    pub urls: &'a dyn UrlNormalizer,
}

impl<'a> PageContext<'a> {
    pub fn new(data: &'a Value, url: &'a str, urls: &'a dyn UrlNormalizer) -> Self {
        Self { data, url, urls }
    }
}

/// Resolves declared trees into plain JSON.
///
/// Holds no state between calls: the same tree and context always produce
/// the same output.
#[derive(Debug, Clone)]
pub struct Resolver {
    filters: FilterRegistry,
    max_depth: usize,
}

impl Resolver {
    pub fn new(filters: FilterRegistry, max_depth: usize) -> Self {
        Self { filters, max_depth }
    }

    pub const fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Replace every reference in `value` with a concrete value.
    ///
    /// Fails on the first error; no partial result is returned.
    pub fn resolve(&self, value: &Value, ctx: &PageContext<'_>) -> Result<Json, ResolveError> {
        self.resolve_at(value, ctx, 0)
    }

    fn resolve_at(
        &self,
        value: &Value,
        ctx: &PageContext<'_>,
        depth: usize,
    ) -> Result<Json, ResolveError> {
        Ok(match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Json::Number(n.clone()),
            Value::String(s) => return self.resolve_string(s, ctx, depth),
            Value::Date(date) => Json::String(format_timestamp(date)),
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .map(|item| self.resolve_at(item, ctx, depth))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => Json::Object(
                map.iter()
                    .map(|(key, item)| Ok((key.clone(), self.resolve_at(item, ctx, depth)?)))
                    .collect::<Result<_, ResolveError>>()?,
            ),
        })
    }

    fn resolve_string(
        &self,
        s: &str,
        ctx: &PageContext<'_>,
        depth: usize,
    ) -> Result<Json, ResolveError> {
        match classify(s) {
            Reference::Plain(text) => Ok(Json::String(text.to_owned())),
            Reference::SelfUrl => Ok(Json::String(ctx.urls.normalize_url(ctx.url, true))),
            Reference::SiteUrl(path) => Ok(Json::String(ctx.urls.normalize_url(path, true))),
            Reference::Data(data) => self.resolve_data(&data, ctx, depth),
        }
    }

    fn resolve_data(
        &self,
        data: &DataRef<'_>,
        ctx: &PageContext<'_>,
        depth: usize,
    ) -> Result<Json, ResolveError> {
        if depth >= self.max_depth {
            return Err(ResolveError::CyclicReference {
                path: data.dotted(),
                depth: self.max_depth,
            });
        }

        let found = extract(ctx.data, &data.path)?;
        if data.filters.is_empty() {
            return self.resolve_at(found, ctx, depth + 1);
        }
        let filtered = self.filters.apply(found.clone(), &data.filters)?;
        self.resolve_at(&filtered, ctx, depth + 1)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(FilterRegistry::builtin(), defaults::jsonld::max_depth())
    }
}

/// Canonical timestamp form: RFC 3339, milliseconds, `Z`.
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// Tests
// ============================================================================
