//! Reference string classification.
//!
//! Authors mark substitutions inside an otherwise free-form tree with
//! reserved string sentinels:
//!
//! | Form                                  | Meaning                          |
//! |---------------------------------------|----------------------------------|
//! | `site-url:self`                       | this page's canonical URL        |
//! | `site-url:/about/`                    | another page's canonical URL     |
//! | `lume-data:title`                     | page data lookup                 |
//! | `lume-data:readingInfo.minutes \| f`  | page data lookup, then filter(s) |
//!
//! Classification order is exact literal, then prefixes, then plain text.
//! Changing the order would turn `site-url:self` into a site path.

/// Exact literal for the current page's URL.
pub const SELF_URL: &str = "site-url:self";

/// Prefix for another absolute site URL.
pub const SITE_URL_PREFIX: &str = "site-url:";

/// Prefix for a page data lookup.
pub const DATA_PREFIX: &str = "lume-data:";

/// Separator between the data path and filter names.
const FILTER_SEPARATOR: char = '|';

/// Separator between keys of a data path.
const PATH_SEPARATOR: char = '.';

/// A classified string leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<'a> {
    /// The page's own canonical URL.
    SelfUrl,
    /// Absolute URL for a site path.
    SiteUrl(&'a str),
    /// Page data lookup with an ordered filter chain.
    Data(DataRef<'a>),
    /// Ordinary text, kept as written.
    Plain(&'a str),
}

/// Parsed `lume-data:` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRef<'a> {
    pub path: Vec<&'a str>,
    pub filters: Vec<&'a str>,
}

impl DataRef<'_> {
    /// Path in its dotted form, for error messages.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// Classify a string leaf.
pub fn classify(value: &str) -> Reference<'_> {
    if value == SELF_URL {
        return Reference::SelfUrl;
    }
    if let Some(path) = value.strip_prefix(SITE_URL_PREFIX) {
        return Reference::SiteUrl(path);
    }
    if let Some(rest) = value.strip_prefix(DATA_PREFIX) {
        let mut segments = rest.split(FILTER_SEPARATOR).map(str::trim);
        // `split` always yields at least one segment
        let path = segments
            .next()
            .unwrap_or_default()
            .split(PATH_SEPARATOR)
            .collect();
        let filters = segments.collect();
        return Reference::Data(DataRef { path, filters });
    }
    Reference::Plain(value)
}
