//! Pagination envelope normalization.
//!
//! Backends of this kind are not consistent about the shape of a paged
//! response: the item list may arrive under `rows`, `list`, `records` or
//! `data`, or as a bare array. `PagedResult` normalizes all of them into a
//! single `{items, total}` shape at the boundary so callers never branch on
//! shape.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Keys under which the item array has been observed.
const ITEM_KEYS: [&str; 4] = ["rows", "list", "records", "data"];

/// A normalized page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T: DeserializeOwned> PagedResult<T> {
    /// Normalize a response payload into a page.
    ///
    /// Accepts a bare array (total = length) or an object carrying the item
    /// array under one of the known keys plus an optional numeric `total`
    /// (falling back to the item count).
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        if let Value::Array(raw) = value {
            let items = parse_items(raw)?;
            let total = items.len() as u64;
            return Ok(Self { items, total });
        }

        if let Value::Object(map) = value {
            for key in ITEM_KEYS {
                if let Some(Value::Array(raw)) = map.get(key) {
                    let items = parse_items(raw.clone())?;
                    let total = map
                        .get("total")
                        .and_then(Value::as_u64)
                        .unwrap_or(items.len() as u64);
                    return Ok(Self { items, total });
                }
            }
            return Err(ApiError::Decode(format!(
                "paged response has no item array under any of {ITEM_KEYS:?}"
            )));
        }

        Err(ApiError::Decode(
            "paged response is neither an array nor an object".to_string(),
        ))
    }
}

fn parse_items<T: DeserializeOwned>(raw: Vec<Value>) -> Result<Vec<T>, ApiError> {
    raw.into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: u64,
        name: String,
    }

    #[test]
    fn rows_with_total() {
        let page: PagedResult<User> = PagedResult::from_value(json!({
            "rows": [{"id": 1, "name": "admin"}],
            "total": 42
        }))
        .unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "admin");
    }

    #[test]
    fn bare_array() {
        let page: PagedResult<User> =
            PagedResult::from_value(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]))
                .unwrap();
        assert_eq!(page.total, 2);
    }

    #[test]
    fn list_and_records_shapes() {
        for key in ["list", "records", "data"] {
            let page: PagedResult<User> =
                PagedResult::from_value(json!({key: [{"id": 7, "name": "x"}]})).unwrap();
            assert_eq!(page.total, 1, "shape {key}");
        }
    }

    #[test]
    fn unknown_shape_is_decode_error() {
        let result: Result<PagedResult<User>, _> = PagedResult::from_value(json!({"weird": true}));
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
