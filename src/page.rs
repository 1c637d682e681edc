//! Page integration for structured data.
//!
//! Two phases, connected only through [`Page::json_ld`]:
//!
//! ```text
//! Page { json_ld: Declared(tree) }
//!     │
//!     └── resolve_page_metadata()     (before the document is finalized)
//!             │
//!             ▼
//! Page { json_ld: Resolved(json) }
//!     │
//!     └── inject_metadata(html)       (after the document exists)
//!             │
//!             └── wrap() ──► serialize() ──► <script type="application/ld+json">
//! ```
//!
//! Pages without declared structured data pass through both phases untouched.

use crate::config::SiteConfig;
use crate::jsonld::{PageContext, Resolver, UrlNormalizer, Value, script_safe, serialize, wrap};
use crate::utils::xml::insert_ld_json;
use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value as Json;
use std::{fs, path::Path};

/// Page data key holding the page's own URL path.
const URL_KEY: &str = "url";

/// Structured data attached to a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageMetadata {
    /// As written by the author, references unresolved.
    Declared(Value),
    /// Every reference replaced.
    Resolved(Json),
}

/// One page as seen by the structured-data pipeline.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL path of the page (e.g., `/posts/hello/`)
    pub url: String,
    /// Page data, root of `lume-data:` lookups
    pub data: Value,
    /// Declared or resolved structured data (None if not present)
    pub json_ld: Option<PageMetadata>,
}

impl Page {
    pub fn new(url: impl Into<String>, data: Value, json_ld: Option<Value>) -> Self {
        Self {
            url: url.into(),
            data,
            json_ld: json_ld.map(PageMetadata::Declared),
        }
    }

    /// Build a page from its data tree.
    ///
    /// - `site` data sits underneath the page's own keys (page keys win)
    /// - the page URL is read from the `url` key
    /// - the `key` entry is moved out of the data as the declared tree
    pub fn from_data(data: Value, site: &Value, key: &str) -> Result<Self> {
        let mut own = match data {
            Value::Object(map) => map,
            other => bail!("page data must be a table/object, found a {}", other.kind()),
        };

        let json_ld = own.shift_remove(key);
        let url = own
            .get(URL_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("page data has no `{URL_KEY}` string"))?
            .to_owned();

        let mut merged = site.as_object().cloned().unwrap_or_default();
        merged.extend(own);

        Ok(Self::new(url, Value::Object(merged), json_ld))
    }

    /// Load a page data file (`.toml` or `.json`).
    pub fn from_path(path: &Path, config: &SiteConfig) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read page data `{}`", path.display()))?;

        let data = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                let table: toml::Table = toml::from_str(&content)
                    .with_context(|| format!("invalid TOML in `{}`", path.display()))?;
                Value::from(toml::Value::Table(table))
            }
            Some("json") => {
                let json: Json = serde_json::from_str(&content)
                    .with_context(|| format!("invalid JSON in `{}`", path.display()))?;
                Value::from(json)
            }
            _ => bail!(
                "unsupported page data format `{}` (expected .toml or .json)",
                path.display()
            ),
        };

        Self::from_data(data, &config.site_data(), &config.jsonld.key)
            .with_context(|| format!("invalid page data `{}`", path.display()))
    }

    /// Resolved structured data, if this page has any.
    pub fn resolved(&self) -> Option<&Json> {
        match &self.json_ld {
            Some(PageMetadata::Resolved(json)) => Some(json),
            _ => None,
        }
    }
}

/// Resolve a page's declared structured data in place.
///
/// Runs once per page before its document is finalized. Pages without
/// declared data, or already resolved, are left untouched.
pub fn resolve_page_metadata(
    page: &mut Page,
    resolver: &Resolver,
    urls: &dyn UrlNormalizer,
) -> Result<()> {
    let Some(PageMetadata::Declared(declared)) = &page.json_ld else {
        return Ok(());
    };

    let ctx = PageContext::new(&page.data, &page.url, urls);
    let resolved = resolver
        .resolve(declared, &ctx)
        .with_context(|| format!("failed to resolve structured data for page `{}`", page.url))?;

    page.json_ld = Some(PageMetadata::Resolved(resolved));
    Ok(())
}

/// Inject a page's resolved structured data into its HTML document.
///
/// Returns the document unchanged when the page has no structured data.
pub fn inject_metadata(page: &Page, html: &[u8], context: &str) -> Result<Vec<u8>> {
    match &page.json_ld {
        None => Ok(html.to_vec()),
        Some(PageMetadata::Declared(_)) => bail!(
            "structured data for page `{}` must be resolved before injection",
            page.url
        ),
        Some(PageMetadata::Resolved(tree)) => {
            let text = serialize(&wrap(tree.clone(), context))?;
            insert_ld_json(html, &script_safe(&text))
                .with_context(|| format!("failed to inject structured data into page `{}`", page.url))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
