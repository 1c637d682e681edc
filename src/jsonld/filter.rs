//! Named post-processing filters for data references.
//!
//! `lume-data:readingInfo.minutes | iso8601minutes` extracts a value and then
//! runs it through each named filter, left to right. Filters are pure and
//! never coerce: a filter handed the wrong shape fails the page.
//!
//! # Built-in Filters
//!
//! | Name             | Accepts | Output              |
//! |------------------|---------|---------------------|
//! | `iso8601minutes` | number  | `PT5M`              |
//! | `iso8601seconds` | number  | `PT90S`             |
//! | `iso8601date`    | date    | `2024-01-01`        |
//! | `count`          | array   | number of elements  |

use super::error::ResolveError;
use super::value::Value;
use indexmap::IndexMap;
use serde_json::Number;

/// Filter body: `None` means the input had the wrong shape.
pub type FilterFn = fn(&Value) -> Option<Value>;

/// A registered filter.
#[derive(Debug, Clone, Copy)]
pub struct Filter {
    /// Shape the filter accepts, reported on type errors.
    pub accepts: &'static str,
    pub apply: FilterFn,
}

/// Immutable name → filter table.
///
/// Owned by the resolver; there is no global registry.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: IndexMap<&'static str, Filter>,
}

impl FilterRegistry {
    /// Registry with no filters.
    pub fn empty() -> Self {
        Self {
            filters: IndexMap::new(),
        }
    }

    /// The built-in filter table.
    pub fn builtin() -> Self {
        Self::empty()
            .with("iso8601minutes", "number", iso8601_minutes)
            .with("iso8601seconds", "number", iso8601_seconds)
            .with("iso8601date", "date", iso8601_date)
            .with("count", "array", count)
    }

    /// Return a registry extended with one more filter.
    pub fn with(mut self, name: &'static str, accepts: &'static str, apply: FilterFn) -> Self {
        self.filters.insert(name, Filter { accepts, apply });
        self
    }

    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    /// Registered filter names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.keys().copied()
    }

    /// Apply `names` to `value`, left to right.
    pub fn apply(&self, value: Value, names: &[&str]) -> Result<Value, ResolveError> {
        names.iter().try_fold(value, |value, name| {
            let filter = self.get(name).ok_or_else(|| ResolveError::UnknownFilter {
                name: (*name).to_owned(),
            })?;
            (filter.apply)(&value).ok_or_else(|| ResolveError::FilterType {
                filter: (*name).to_owned(),
                expected: filter.accepts,
                found: value.kind(),
            })
        })
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Built-in Filters
// ============================================================================

fn iso8601_minutes(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => Some(Value::String(format!("PT{}M", format_number(n)))),
        _ => None,
    }
}

fn iso8601_seconds(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => Some(Value::String(format!("PT{}S", format_number(n)))),
        _ => None,
    }
}

fn iso8601_date(value: &Value) -> Option<Value> {
    match value {
        Value::Date(date) => Some(Value::String(date.format("%Y-%m-%d").to_string())),
        _ => None,
    }
}

fn count(value: &Value) -> Option<Value> {
    match value {
        Value::Array(items) => Some(Value::Number(Number::from(items.len()))),
        _ => None,
    }
}

/// Print a number the way it reads: integral floats drop their `.0`.
fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn float(f: f64) -> Value {
        Value::Number(Number::from_f64(f).unwrap())
    }

    #[test]
    fn test_iso8601_minutes() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.apply(Value::from(5_i64), &["iso8601minutes"]),
            Ok(Value::from("PT5M"))
        );
    }

    #[test]
    fn test_iso8601_minutes_float() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.apply(float(5.0), &["iso8601minutes"]),
            Ok(Value::from("PT5M"))
        );
        assert_eq!(
            registry.apply(float(4.5), &["iso8601minutes"]),
            Ok(Value::from("PT4.5M"))
        );
    }

    #[test]
    fn test_unknown_filter() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.apply(Value::from(5_i64), &["bogus"]),
            Err(ResolveError::UnknownFilter {
                name: "bogus".into()
            })
        );
    }

    #[test]
    fn test_filter_type_error_no_coercion() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.apply(Value::from("5"), &["iso8601minutes"]),
            Err(ResolveError::FilterType {
                filter: "iso8601minutes".into(),
                expected: "number",
                found: "string",
            })
        );
    }

    #[test]
    fn test_filters_compose_left_to_right() {
        let registry = FilterRegistry::builtin();
        let tags = Value::Array(vec![Value::from("a"), Value::from("b"), Value::from("c")]);
        assert_eq!(
            registry.apply(tags, &["count", "iso8601seconds"]),
            Ok(Value::from("PT3S"))
        );
        // Reversed order feeds a string into `count`
        assert_eq!(
            registry.apply(Value::from(3_i64), &["iso8601seconds", "count"]),
            Err(ResolveError::FilterType {
                filter: "count".into(),
                expected: "array",
                found: "string",
            })
        );
    }

    #[test]
    fn test_unknown_filter_stops_chain() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.apply(Value::from(1_i64), &["iso8601minutes", "nope", "count"]),
            Err(ResolveError::UnknownFilter { name: "nope".into() })
        );
    }

    #[test]
    fn test_iso8601_date() {
        let registry = FilterRegistry::builtin();
        let date = Value::Date(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 0).unwrap());
        assert_eq!(
            registry.apply(date, &["iso8601date"]),
            Ok(Value::from("2024-02-29"))
        );
    }

    #[test]
    fn test_no_filters_is_identity() {
        let registry = FilterRegistry::builtin();
        assert_eq!(
            registry.apply(Value::from("x"), &[]),
            Ok(Value::from("x"))
        );
    }

    #[test]
    fn test_empty_registry_rejects_builtin_names() {
        let registry = FilterRegistry::empty();
        assert!(registry.apply(Value::from(1_i64), &["iso8601minutes"]).is_err());
    }

    #[test]
    fn test_registries_are_independent() {
        fn shout(value: &Value) -> Option<Value> {
            value.as_str().map(|s| Value::String(s.to_uppercase()))
        }

        let extended = FilterRegistry::builtin().with("shout", "string", shout);
        let builtin = FilterRegistry::builtin();

        assert_eq!(
            extended.apply(Value::from("hi"), &["shout"]),
            Ok(Value::from("HI"))
        );
        assert!(builtin.get("shout").is_none());
        assert_eq!(
            builtin.names().collect::<Vec<_>>(),
            vec!["iso8601minutes", "iso8601seconds", "iso8601date", "count"]
        );
    }
}
