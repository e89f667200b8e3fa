//! User administration operations.

use cargoapp_auth::SessionProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::functions::{body_with_id, list_page};
use crate::gateway::{FunctionRequest, Gateway};
use crate::pager::{ListPage, PageRequest};

#[derive(Clone, Debug, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

pub async fn list_users<P: SessionProvider>(
    gateway: &Gateway<P>,
    page: PageRequest,
    filter: &UserFilter,
) -> Result<ListPage<UserSummary>, GatewayError> {
    let req = FunctionRequest::new("list-users")
        .query("page", (page.page_index + 1).to_string())
        .query("pageSize", page.page_size.to_string())
        .query("search", filter.search.clone())
        .query("role", filter.role.clone());
    let value = gateway.invoke(req).await?;
    list_page(value, "users", page)
}

// The creation endpoint is the one camelCase holdout in the function names.
pub async fn create_user<P: SessionProvider>(
    gateway: &Gateway<P>,
    user: &NewUser,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "createUser",
            serde_json::to_value(user)?,
        ))
        .await
}

pub async fn update_user<P: SessionProvider>(
    gateway: &Gateway<P>,
    id: &str,
    changes: &UserUpdate,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "update-user",
            body_with_id(id, changes)?,
        ))
        .await
}
