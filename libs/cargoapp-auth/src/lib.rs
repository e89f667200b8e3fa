//! Identity and authorization state for the CargoApp client.
//!
//! Covers everything between the transport and the view layer: platform
//! configuration from the environment, the replace-only session store with
//! change subscriptions, the auth endpoint client, the permission store and
//! visibility gate, role classification, the active-role profile lookup, and
//! the role-aware dashboard dispatcher.

mod auth_client;
mod config;
mod dashboard;
mod permission;
mod profile;
mod role;
mod session;

pub use auth_client::{AuthClient, AuthError, AuthUser};
pub use config::{ENV_ANON_KEY, ENV_BACKEND_URL, PlatformConfig};
pub use dashboard::{DashboardAction, DashboardView};
pub use permission::{PermissionName, PermissionRecord, PermissionStore, has_permission};
pub use profile::{ActiveRoleProfile, ResolvedRole, RoleResolutionError, resolve_active_role};
pub use role::Role;
pub use session::{Session, SessionLookupError, SessionProvider, SessionStore};
