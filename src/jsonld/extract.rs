//! Dotted-path lookup into page data.

use super::error::ResolveError;
use super::value::Value;

/// Follow `path` from `context`, one key per step.
///
/// Objects are indexed by key, arrays by decimal position. Every other value,
/// dates included, is a leaf: stepping into one is [`ResolveError::NotAnObject`].
/// Absence is always an error: a missing key and a `null` value both report
/// [`ResolveError::NotFound`].
pub fn extract<'v>(context: &'v Value, path: &[&str]) -> Result<&'v Value, ResolveError> {
    let dotted = || path.join(".");
    let not_found = || ResolveError::NotFound { path: dotted() };

    let mut current = context;
    for segment in path {
        let next = match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => {
                return Err(ResolveError::NotAnObject {
                    path: dotted(),
                    segment: (*segment).to_owned(),
                });
            }
        };
        current = match next {
            Some(value) if !value.is_null() => value,
            _ => return Err(not_found()),
        };
    }
    Ok(current)
}
