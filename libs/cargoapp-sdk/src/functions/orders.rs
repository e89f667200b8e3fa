//! Order and order-detail operations.

use cargoapp_auth::SessionProvider;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::GatewayError;
use crate::functions::{body_with_id, list_page};
use crate::gateway::{FunctionRequest, Gateway};
use crate::pager::{ListPage, PageRequest};

#[derive(Clone, Debug, Default)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub project_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OrderDetailLine {
    pub id: String,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub details: Vec<OrderDetailLine>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewOrder {
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewOrderDetail {
    pub order_id: String,
    pub service_id: String,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct OrderDetailUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub async fn list_orders<P: SessionProvider>(
    gateway: &Gateway<P>,
    page: PageRequest,
    filter: &OrderFilter,
) -> Result<ListPage<OrderSummary>, GatewayError> {
    let req = FunctionRequest::new("list-orders")
        .query("page", (page.page_index + 1).to_string())
        .query("pageSize", page.page_size.to_string())
        .query("search", filter.search.clone())
        .query("project_id", filter.project_id.clone())
        .query("status", filter.status.clone());
    let value = gateway.invoke(req).await?;
    list_page(value, "orders", page)
}

pub async fn get_order<P: SessionProvider>(
    gateway: &Gateway<P>,
    id: &str,
) -> Result<Order, GatewayError> {
    let req = FunctionRequest::new("get-order").query("id", id.to_owned());
    let value = gateway.invoke(req).await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn create_order<P: SessionProvider>(
    gateway: &Gateway<P>,
    order: &NewOrder,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "create-order",
            serde_json::to_value(order)?,
        ))
        .await
}

pub async fn update_order<P: SessionProvider>(
    gateway: &Gateway<P>,
    id: &str,
    changes: &OrderUpdate,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "update-order",
            body_with_id(id, changes)?,
        ))
        .await
}

pub async fn create_order_detail<P: SessionProvider>(
    gateway: &Gateway<P>,
    detail: &NewOrderDetail,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "create-order-detail",
            serde_json::to_value(detail)?,
        ))
        .await
}

pub async fn update_order_detail<P: SessionProvider>(
    gateway: &Gateway<P>,
    id: &str,
    changes: &OrderDetailUpdate,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "update-order-detail",
            body_with_id(id, changes)?,
        ))
        .await
}

pub async fn delete_order_detail<P: SessionProvider>(
    gateway: &Gateway<P>,
    id: &str,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "delete-order-detail",
            json!({ "id": id }),
        ))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargoapp_auth::{PlatformConfig, Session, SessionStore};
    use cargoapp_http::HttpClient;
    use httpmock::prelude::*;
    use std::sync::Arc;

    fn gateway_for(server: &MockServer) -> Gateway<Arc<SessionStore>> {
        let http = HttpClient::builder()
            .allow_insecure_http()
            .build()
            .unwrap();
        let config = PlatformConfig::new(server.base_url(), None);
        let sessions = Arc::new(SessionStore::new());
        sessions.replace(Some(Session {
            user_id: "u1".into(),
            access_token: "tok".into(),
            refresh_token: "r".into(),
            expires_at: None,
        }));
        Gateway::new(http, config, sessions)
    }

    #[tokio::test]
    async fn list_orders_maps_the_envelope() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/functions/v1/list-orders")
                    .query_param("page", "1")
                    .query_param("pageSize", "20")
                    .query_param("status", "pending");
                then.status(200).json_body(serde_json::json!({
                    "orders": [{"id": "o1", "status": "pending"}],
                    "total": 21
                }));
            })
            .await;

        let gateway = gateway_for(&server);
        let filter = OrderFilter {
            status: Some("pending".into()),
            ..OrderFilter::default()
        };
        let page = list_orders(
            &gateway,
            PageRequest {
                page_index: 0,
                page_size: 20,
            },
            &filter,
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "o1");
        assert_eq!(page.total_count, 21);
        assert!(page.has_more);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_order_grafts_id_into_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/functions/v1/update-order")
                    .json_body(serde_json::json!({"id": "o-3", "status": "delivered"}));
                then.status(200).json_body(serde_json::json!({"ok": true}));
            })
            .await;

        let gateway = gateway_for(&server);
        let changes = OrderUpdate {
            status: Some("delivered".into()),
            ..OrderUpdate::default()
        };
        update_order(&gateway, "o-3", &changes).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_order_decodes_detail_lines() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/functions/v1/get-order")
                    .query_param("id", "o-3");
                then.status(200).json_body(serde_json::json!({
                    "id": "o-3",
                    "status": "pending",
                    "details": [{"id": "d1", "service_id": "s1", "quantity": 2.0}]
                }));
            })
            .await;

        let gateway = gateway_for(&server);
        let order = get_order(&gateway, "o-3").await.unwrap();
        assert_eq!(order.details.len(), 1);
        assert_eq!(order.details[0].service_id.as_deref(), Some("s1"));
    }
}
