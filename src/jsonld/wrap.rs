//! Linked-data context wrapping and serialization.

use serde_json::{Map, Value as Json};

/// Top-level key carrying the linked-data vocabulary.
pub const CONTEXT_KEY: &str = "@context";

/// Attach `@context` to a resolved tree.
///
/// - object: `@context` becomes the first key; an author-supplied value wins
/// - array: every object element is wrapped on its own
/// - anything else is returned as is
pub fn wrap(tree: Json, context: &str) -> Json {
    match tree {
        Json::Object(map) => Json::Object(with_context(map, context)),
        Json::Array(items) => Json::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Json::Object(map) => Json::Object(with_context(map, context)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn with_context(mut map: Map<String, Json>, context: &str) -> Map<String, Json> {
    let value = map
        .shift_remove(CONTEXT_KEY)
        .unwrap_or_else(|| Json::String(context.to_owned()));

    let mut wrapped = Map::with_capacity(map.len() + 1);
    wrapped.insert(CONTEXT_KEY.to_owned(), value);
    wrapped.extend(map);
    wrapped
}

/// Compact JSON text, keys in resolution order.
pub fn serialize(tree: &Json) -> serde_json::Result<String> {
    serde_json::to_string(tree)
}

/// Make JSON text safe to place inside a `<script>` element.
///
/// `<` only occurs inside JSON strings, where `\u003c` decodes to the same
/// character, so `</script>` in author text cannot close the element.
pub fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &str = "https://schema.org";

    #[test]
    fn test_wrap_object_prepends_context() {
        let wrapped = wrap(json!({ "@type": "Person", "name": "A" }), SCHEMA);

        let keys: Vec<_> = wrapped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["@context", "@type", "name"]);
        assert_eq!(wrapped["@context"], SCHEMA);
    }

    #[test]
    fn test_wrap_keeps_author_context() {
        let wrapped = wrap(json!({ "@type": "Person", "@context": "https://other.org" }), SCHEMA);

        let keys: Vec<_> = wrapped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["@context", "@type"]);
        assert_eq!(wrapped["@context"], "https://other.org");
    }

    #[test]
    fn test_wrap_array_per_element() {
        let wrapped = wrap(json!([{ "@type": "A" }, { "@type": "B" }, "loose"]), SCHEMA);

        assert_eq!(
            wrapped,
            json!([
                { "@context": SCHEMA, "@type": "A" },
                { "@context": SCHEMA, "@type": "B" },
                "loose",
            ])
        );
    }

    #[test]
    fn test_wrap_scalar_untouched() {
        assert_eq!(wrap(json!("x"), SCHEMA), json!("x"));
    }

    #[test]
    fn test_serialize_round_trip_object() {
        let resolved = json!({ "@type": "BlogPosting", "headline": "X", "n": 1.5 });
        let text = serialize(&wrap(resolved.clone(), SCHEMA)).unwrap();
        let parsed: Json = serde_json::from_str(&text).unwrap();

        let mut expected = resolved.as_object().unwrap().clone();
        expected.insert(CONTEXT_KEY.into(), json!(SCHEMA));
        assert_eq!(parsed, Json::Object(expected));
    }

    #[test]
    fn test_serialize_round_trip_array() {
        let resolved = json!([{ "@type": "A" }, { "@type": "B", "x": [1, 2] }]);
        let text = serialize(&wrap(resolved, SCHEMA)).unwrap();
        let parsed: Json = serde_json::from_str(&text).unwrap();

        assert_eq!(
            parsed,
            json!([
                { "@context": SCHEMA, "@type": "A" },
                { "@context": SCHEMA, "@type": "B", "x": [1, 2] },
            ])
        );
    }

    #[test]
    fn test_serialize_key_order() {
        let text = serialize(&wrap(json!({ "z": 1, "a": 2 }), SCHEMA)).unwrap();
        assert_eq!(text, r#"{"@context":"https://schema.org","z":1,"a":2}"#);
    }

    #[test]
    fn test_script_safe() {
        let text = serialize(&json!({ "x": "</script><b>" })).unwrap();
        let safe = script_safe(&text);

        assert!(!safe.contains('<'));
        let parsed: Json = serde_json::from_str(&safe).unwrap();
        assert_eq!(parsed, json!({ "x": "</script><b>" }));
    }
}
