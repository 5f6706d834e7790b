//! Query parameter encoding.
//!
//! Serializes a flat or one-level-nested JSON mapping into an
//! `application/x-www-form-urlencoded` string: `&`-joined, `=`-joined,
//! percent-encoded, with no trailing separator. Nested mappings are encoded
//! as `parent[child]=value`; `null` and empty-string values are omitted
//! entirely rather than encoded as empty pairs.
//!
//! Both functions are pure; non-object input is treated as "no parameters".

use serde_json::Value;

/// Encode a parameter mapping into a query string.
pub fn encode_params(params: &Value) -> String {
    let Value::Object(map) = params else {
        return String::new();
    };

    let mut parts = Vec::new();
    for (key, value) in map {
        match value {
            Value::Object(nested) => {
                for (child, nested_value) in nested {
                    push_pair(&mut parts, &format!("{key}[{child}]"), nested_value);
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    push_pair(&mut parts, &format!("{key}[{index}]"), item);
                }
            }
            _ => push_pair(&mut parts, key, value),
        }
    }
    parts.join("&")
}

/// Append an encoded parameter mapping to a request path.
///
/// Used by the dispatcher to rewrite GET URLs; the structured parameter
/// object is dropped afterwards so the transport does not serialize it a
/// second time.
pub fn append_query(path: &str, params: &Value) -> String {
    let query = encode_params(params);
    if query.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{query}")
}

fn push_pair(parts: &mut Vec<String>, key: &str, value: &Value) {
    let Some(text) = scalar_text(value) else {
        return;
    };
    parts.push(format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(&text)
    ));
}

/// Render a value for the wire; `None` means the pair is omitted.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // Deeper nesting is serialized as raw JSON text
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_mapping() {
        let query = encode_params(&json!({"pageNum": 1, "pageSize": 10}));
        assert_eq!(query, "pageNum=1&pageSize=10");
    }

    #[test]
    fn null_and_empty_values_omitted() {
        let query = encode_params(&json!({
            "pageNum": 1,
            "pageSize": 10,
            "beginTime": null,
            "endTime": ""
        }));
        assert_eq!(query, "pageNum=1&pageSize=10");
        assert!(!query.ends_with('&'));
    }

    #[test]
    fn nested_mapping_uses_bracket_keys() {
        let query = encode_params(&json!({"a": 1, "b": {"c": 2}}));
        let pairs: Vec<&str> = query.split('&').collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&"a=1"));
        // Brackets are percent-encoded on the wire; decoding recovers b[c]=2
        let decoded: Vec<String> = pairs
            .iter()
            .map(|p| urlencoding::decode(p).unwrap().into_owned())
            .collect();
        assert!(decoded.contains(&"b[c]=2".to_string()));
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = encode_params(&json!({"name": "a b&c"}));
        assert_eq!(query, "name=a%20b%26c");
    }

    #[test]
    fn non_object_input_is_empty() {
        assert_eq!(encode_params(&json!(null)), "");
        assert_eq!(encode_params(&json!("plain")), "");
        assert_eq!(encode_params(&json!(42)), "");
    }

    #[test]
    fn append_query_joins_correctly() {
        assert_eq!(
            append_query("/system/user/list", &json!({"pageNum": 1})),
            "/system/user/list?pageNum=1"
        );
        assert_eq!(
            append_query("/list?fixed=1", &json!({"pageNum": 2})),
            "/list?fixed=1&pageNum=2"
        );
        assert_eq!(append_query("/list", &json!({})), "/list");
    }
}
