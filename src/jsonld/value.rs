//! Value model for declared structured data and page data.
//!
//! Both sides of resolution share one tree type:
//! - the author-declared metadata tree (may contain reference strings)
//! - the page data context that data references are looked up in
//!
//! Host formats convert into it: JSON via `serde_json::Value`, TOML via
//! `toml::Value`. TOML is the only host format with native datetimes, which
//! land in [`Value::Date`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde_json::Number;

/// Insertion-ordered object map.
pub type Map = IndexMap<String, Value>;

/// A node of a structured-data or page-data tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    /// Plain text or a reference string (see [`super::reference::classify`]).
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Name of the runtime shape, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub const fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key on an object; `None` for any other shape.
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Object(Map::new())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Object(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => Self::Number(n),
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        use toml::Value as Toml;
        match value {
            Toml::String(s) => Self::String(s),
            Toml::Integer(i) => Self::Number(i.into()),
            // NaN and infinities have no JSON form
            Toml::Float(f) => Number::from_f64(f).map_or(Self::Null, Self::Number),
            Toml::Boolean(b) => Self::Bool(b),
            Toml::Datetime(dt) => {
                let text = dt.to_string();
                parse_toml_datetime(&text).map_or(Self::String(text), Self::Date)
            }
            Toml::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Toml::Table(table) => {
                Self::Object(table.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Parse the textual form of a TOML datetime.
///
/// Offset datetimes keep their instant. Local datetimes and local dates are
/// taken as UTC. Local times have no date and yield `None`.
fn parse_toml_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// ============================================================================
// Tests
// ============================================================================
