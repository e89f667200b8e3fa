//! Backend platform configuration.

/// Environment variable holding the backend base URL.
pub const ENV_BACKEND_URL: &str = "CARGOAPP_BACKEND_URL";
/// Environment variable holding the publishable API key.
pub const ENV_ANON_KEY: &str = "CARGOAPP_ANON_KEY";

/// Base URL and publishable key for the backend platform.
///
/// Construction never fails: a missing value degrades to a warning and an
/// empty/absent field, so the layer stays inspectable without a configured
/// backend.
#[derive(Clone, Debug)]
pub struct PlatformConfig {
    base_url: String,
    anon_key: Option<String>,
}

impl PlatformConfig {
    pub fn new(base_url: impl Into<String>, anon_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, anon_key }
    }

    /// Read configuration from [`ENV_BACKEND_URL`] and [`ENV_ANON_KEY`].
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_BACKEND_URL).unwrap_or_else(|_| {
            tracing::warn!(var = ENV_BACKEND_URL, "backend URL not configured");
            String::new()
        });
        let anon_key = match std::env::var(ENV_ANON_KEY) {
            Ok(key) => Some(key),
            Err(_) => {
                tracing::warn!(var = ENV_ANON_KEY, "publishable API key not configured");
                None
            }
        };
        Self::new(base_url, anon_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn anon_key(&self) -> Option<&str> {
        self.anon_key.as_deref()
    }

    /// URL of a named remote function.
    pub fn functions_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{name}", self.base_url)
    }

    /// URL of an auth endpoint (e.g. `token`, `logout`, `user`).
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// URL of a REST table or view.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let cfg = PlatformConfig::new("https://backend.example.com/", None);
        assert_eq!(cfg.base_url(), "https://backend.example.com");
        assert_eq!(
            cfg.functions_url("list-orders"),
            "https://backend.example.com/functions/v1/list-orders"
        );
    }

    #[test]
    fn url_helpers_cover_all_surfaces() {
        let cfg = PlatformConfig::new("https://b.example.com", Some("anon".into()));
        assert_eq!(cfg.auth_url("token"), "https://b.example.com/auth/v1/token");
        assert_eq!(
            cfg.rest_url("active_role_view"),
            "https://b.example.com/rest/v1/active_role_view"
        );
        assert_eq!(cfg.anon_key(), Some("anon"));
    }
}
