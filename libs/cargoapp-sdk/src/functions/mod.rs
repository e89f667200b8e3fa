//! Typed wrappers over the named remote functions, one module per entity.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::GatewayError;
use crate::pager::{ListPage, PageRequest};

pub mod orders;
pub mod projects;
pub mod services;
pub mod users;
pub mod vehicles;

/// Map a `{ "<key>": [...], "total": n }` envelope onto a [`ListPage`].
///
/// A missing item array means an empty page; `has_more` is derived from the
/// reported total.
pub(crate) fn list_page<T: DeserializeOwned>(
    value: Value,
    key: &str,
    request: PageRequest,
) -> Result<ListPage<T>, GatewayError> {
    let total = value.get("total").and_then(Value::as_u64).unwrap_or(0);
    let items: Vec<T> = match value.get(key) {
        Some(array) => serde_json::from_value(array.clone())?,
        None => Vec::new(),
    };
    let has_more = (request.page_index + 1).saturating_mul(request.page_size) < total;
    Ok(ListPage {
        items,
        total_count: total,
        has_more,
        page_index: request.page_index,
    })
}

/// Serialize `changes` and graft the entity id into the object.
pub(crate) fn body_with_id<T: serde::Serialize>(
    id: &str,
    changes: &T,
) -> Result<Value, GatewayError> {
    let mut body = serde_json::to_value(changes)?;
    match &mut body {
        Value::Object(map) => {
            map.insert("id".to_owned(), Value::String(id.to_owned()));
            Ok(body)
        }
        _ => Err(GatewayError::InvalidRequest(
            "update payload must serialize to an object".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_maps_items_and_total() {
        let value = json!({"orders": [{"id": "o1"}], "total": 41});
        let page: ListPage<Value> = list_page(
            value,
            "orders",
            PageRequest {
                page_index: 0,
                page_size: 20,
            },
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 41);
        assert!(page.has_more);
    }

    #[test]
    fn last_page_has_no_more() {
        let value = json!({"orders": [], "total": 40});
        let page: ListPage<Value> = list_page(
            value,
            "orders",
            PageRequest {
                page_index: 1,
                page_size: 20,
            },
        )
        .unwrap();
        assert!(!page.has_more);
    }

    #[test]
    fn missing_array_is_an_empty_page() {
        let page: ListPage<Value> = list_page(
            json!({}),
            "orders",
            PageRequest {
                page_index: 0,
                page_size: 20,
            },
        )
        .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert!(!page.has_more);
    }

    #[test]
    fn body_with_id_grafts_the_id() {
        let body = body_with_id("o-7", &json!({"status": "delivered"})).unwrap();
        assert_eq!(body, json!({"id": "o-7", "status": "delivered"}));
    }
}
