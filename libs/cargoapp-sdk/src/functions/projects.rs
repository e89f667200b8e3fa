//! Project operations.

use cargoapp_auth::SessionProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::functions::list_page;
use crate::gateway::{FunctionRequest, Gateway};
use crate::pager::{ListPage, PageRequest};

#[derive(Clone, Debug, Default)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub active_only: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub async fn list_projects<P: SessionProvider>(
    gateway: &Gateway<P>,
    page: PageRequest,
    filter: &ProjectFilter,
) -> Result<ListPage<ProjectSummary>, GatewayError> {
    let active = filter.active_only.then(|| "true".to_owned());
    let req = FunctionRequest::new("list-projects")
        .query("page", (page.page_index + 1).to_string())
        .query("pageSize", page.page_size.to_string())
        .query("search", filter.search.clone())
        .query("active", active);
    let value = gateway.invoke(req).await?;
    list_page(value, "projects", page)
}

pub async fn create_project<P: SessionProvider>(
    gateway: &Gateway<P>,
    project: &NewProject,
) -> Result<Value, GatewayError> {
    gateway
        .invoke(FunctionRequest::post_json(
            "create-project",
            serde_json::to_value(project)?,
        ))
        .await
}
