//! Bracket-notation query string encoding for the content backend.
//!
//! `{"filters": {"locale": "en"}, "fields": ["title"]}` encodes to
//! `filters[locale]=en&fields[0]=title` (brackets percent-encoded).

use serde_json::Value;

/// Flatten a query value into ordered `(key, value)` pairs.
///
/// Nested objects use `parent[child]`, arrays use `parent[index]`. Null leaves
/// encode as an empty value; empty objects and arrays produce nothing. A
/// top-level scalar has no key and yields no pairs.
pub fn encode_pairs(query: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    match query {
        Value::Object(map) => {
            for (key, value) in map {
                push_pairs(key.clone(), value, &mut pairs);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                push_pairs(index.to_string(), value, &mut pairs);
            }
        }
        _ => {}
    }
    pairs
}

fn push_pairs(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                push_pairs(format!("{prefix}[{key}]"), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                push_pairs(format!("{prefix}[{index}]"), child, out);
            }
        }
        Value::Null => out.push((prefix, String::new())),
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
    }
}

/// Encode a query value as a URL query string (without the leading `?`).
pub fn to_query_string(query: &Value) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in encode_pairs(query) {
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(query: Value) -> Vec<(String, String)> {
        encode_pairs(&query)
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_nested_filters_and_indexed_arrays() {
        let encoded = pairs(json!({
            "fields": ["url", "templateName"],
            "filters": {"url": "/en/glossary"},
        }));
        assert_eq!(
            encoded,
            vec![
                pair("fields[0]", "url"),
                pair("fields[1]", "templateName"),
                pair("filters[url]", "/en/glossary"),
            ]
        );
    }

    #[test]
    fn test_deep_nesting_and_scalars() {
        let encoded = pairs(json!({
            "filters": {"tags": {"name": {"$eq": "Glossary"}}},
            "pagination": {"pageSize": 100, "withCount": false},
            "populate": null,
        }));
        assert_eq!(
            encoded,
            vec![
                pair("filters[tags][name][$eq]", "Glossary"),
                pair("pagination[pageSize]", "100"),
                pair("pagination[withCount]", "false"),
                pair("populate", ""),
            ]
        );
    }

    #[test]
    fn test_empty_containers_produce_nothing() {
        assert!(pairs(json!({"fields": [], "filters": {}})).is_empty());
        assert!(pairs(json!("bare")).is_empty());
    }

    #[test]
    fn test_query_string_percent_encodes() {
        let qs = to_query_string(&json!({"filters": {"slug": "what is defi"}}));
        assert_eq!(qs, "filters%5Bslug%5D=what+is+defi");
    }
}
