//! Active-role profile lookup.
//!
//! The backend exposes a denormalized `active_role_view` keyed by the auth
//! user id; one row describes the user's active role, company and granted
//! permissions. Resolution replaces the permission store wholesale.

use cargoapp_http::{HttpClient, HttpError};
use serde::Deserialize;
use thiserror::Error;
use url::form_urlencoded;

use crate::config::PlatformConfig;
use crate::permission::{PermissionRecord, PermissionStore};
use crate::role::Role;

/// One row of `active_role_view`.
#[derive(Clone, Debug, Deserialize)]
pub struct ActiveRoleProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    pub role_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    /// Granted permission names, for quick gating.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Full permission rows, kept in the permission store.
    #[serde(default)]
    pub permissions_full: Vec<PermissionRecord>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoleResolutionError {
    /// The user has no active role row. Callers treat this as forced
    /// sign-out.
    #[error("no active role assigned")]
    NoActiveRole,

    #[error("role lookup failed with status {status}")]
    Remote { status: u16 },

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("malformed role profile: {0}")]
    Malformed(String),
}

/// The outcome of role resolution.
///
/// `role` is `None` when the backend reports a role name outside the known
/// vocabulary; the dashboard layer applies its own fallback.
#[derive(Clone, Debug)]
pub struct ResolvedRole {
    pub role: Option<Role>,
    pub profile: ActiveRoleProfile,
}

/// Fetch the active-role profile for `auth_id` and install its permissions.
pub async fn resolve_active_role(
    http: &HttpClient,
    config: &PlatformConfig,
    permissions: &PermissionStore,
    access_token: &str,
    auth_id: &str,
) -> Result<ResolvedRole, RoleResolutionError> {
    let filter: String = form_urlencoded::byte_serialize(auth_id.as_bytes()).collect();
    let url = format!(
        "{}?auth_id=eq.{filter}&limit=1",
        config.rest_url("active_role_view")
    );

    let mut req = http.get(url).bearer_auth(access_token);
    if let Some(key) = config.anon_key() {
        req = req.header("apikey", key);
    }
    let resp = req.send().await?;
    if !resp.is_success() {
        return Err(RoleResolutionError::Remote {
            status: resp.status().as_u16(),
        });
    }

    let text = resp.text().await?;
    let mut rows: Vec<ActiveRoleProfile> =
        serde_json::from_str(&text).map_err(|e| RoleResolutionError::Malformed(e.to_string()))?;
    let Some(profile) = rows.pop() else {
        return Err(RoleResolutionError::NoActiveRole);
    };

    permissions.replace(profile.permissions_full.clone());

    let role = Role::from_role_name(&profile.role_name);
    if role.is_none() {
        tracing::warn!(role_name = %profile.role_name, "unrecognized role name");
    }
    Ok(ResolvedRole { role, profile })
}
