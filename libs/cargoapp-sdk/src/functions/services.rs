//! Service catalog operations.

use cargoapp_auth::SessionProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::functions::{body_with_id, list_page};
use crate::gateway::{FunctionRequest, Gateway};
use crate::pager::{ListPage, PageRequest};

#[derive(Clone, Debug, Default)]
pub struct ServiceFilter {
    pub search: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServiceSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewService {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

pub async fn list_services<P: SessionProvider>(
    gateway: &Gateway<P>,
    page: PageRequest,
    filter: &ServiceFilter,
) -> Result<ListPage<ServiceSummary>, GatewayError> {
    let req = FunctionRequest::new("list-services")
        .query("page", (page.page_index + 1).to_string())
        .query("pageSize", page.page_size.to_string())
        .query("search", filter.search.clone());
    let value = gateway.invoke(req).await?;
    list_page(value, "services", page)
}

pub async fn get_service<P: SessionProvider>(
    gateway: &Gateway<P>,
    id: &str,
) -> Result<ServiceSummary, GatewayError> {
    let req = FunctionRequest::new("get-service").query("id", id.to_owned());
    let value = gateway.invoke(req).await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn create_service<P: SessionProvider>(
    gateway: &Gateway<P>,
    service: &NewService,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "create-service",
            serde_json::to_value(service)?,
        ))
        .await
}

pub async fn update_service<P: SessionProvider>(
    gateway: &Gateway<P>,
    id: &str,
    changes: &ServiceUpdate,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "update-service",
            body_with_id(id, changes)?,
        ))
        .await
}
