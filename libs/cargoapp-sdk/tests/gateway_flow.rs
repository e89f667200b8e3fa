//! End-to-end flow: session store → gateway → typed surface → pager.

use std::sync::Arc;

use cargoapp_auth::{PlatformConfig, Session, SessionStore};
use cargoapp_http::HttpClient;
use cargoapp_sdk::functions::orders::{self, OrderFilter};
use cargoapp_sdk::{FunctionRequest, Gateway, GatewayError, ListPager, PageRequest};
use httpmock::prelude::*;

fn signed_in_store(token: &str) -> Arc<SessionStore> {
    let store = Arc::new(SessionStore::new());
    store.replace(Some(Session {
        user_id: "u-9".into(),
        access_token: token.into(),
        refresh_token: "ref".into(),
        expires_at: None,
    }));
    store
}

fn gateway_for(server: &MockServer, token: &str) -> Gateway<Arc<SessionStore>> {
    let http = HttpClient::builder()
        .allow_insecure_http()
        .build()
        .unwrap();
    let config = PlatformConfig::new(server.base_url(), Some("anon-key".into()));
    Gateway::new(http, config, signed_in_store(token))
}

#[tokio::test]
async fn list_orders_round_trip_with_dropped_filter() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/functions/v1/list-orders")
                .query_param("page", "1")
                .query_param("pageSize", "20")
                .query_param_missing("project_id")
                .header("authorization", "Bearer tok123");
            then.status(200)
                .json_body(serde_json::json!({"orders": [], "total": 0}));
        })
        .await;

    let gateway = gateway_for(&server, "tok123");
    let value = gateway
        .invoke(
            FunctionRequest::new("list-orders")
                .query("page", "1".to_owned())
                .query("pageSize", "20".to_owned())
                .query("project_id", None),
        )
        .await
        .unwrap();

    assert_eq!(value, serde_json::json!({"orders": [], "total": 0}));
    mock.assert_async().await;
}

#[tokio::test]
async fn backend_failure_surfaces_its_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/functions/v1/list-orders");
            then.status(500)
                .json_body(serde_json::json!({"error": "boom"}));
        })
        .await;

    let gateway = gateway_for(&server, "tok123");
    let err = gateway
        .invoke(FunctionRequest::new("list-orders"))
        .await
        .unwrap_err();
    match err {
        GatewayError::Remote { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn pager_drives_the_typed_order_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/functions/v1/list-orders")
                .query_param("page", "1");
            then.status(200).json_body(serde_json::json!({
                "orders": [{"id": "o1"}, {"id": "o2"}],
                "total": 3
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/functions/v1/list-orders")
                .query_param("page", "2");
            then.status(200).json_body(serde_json::json!({
                "orders": [{"id": "o3"}],
                "total": 3
            }));
        })
        .await;

    let gateway = Arc::new(gateway_for(&server, "tok123"));
    let pager = ListPager::new(2, OrderFilter::default(), {
        let gateway = Arc::clone(&gateway);
        move |page: PageRequest, filter: OrderFilter| {
            let gateway = Arc::clone(&gateway);
            async move { orders::list_orders(&gateway, page, &filter).await }
        }
    });

    pager.refresh().await;
    let state = pager.state();
    assert_eq!(state.items.len(), 2);
    assert!(state.has_more);

    pager.load_more().await;
    let state = pager.state();
    let ids: Vec<&str> = state.items.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["o1", "o2", "o3"]);
    assert!(!state.has_more);
    assert!(state.error.is_none());
}
