//! Password-reset flow and its client-side checks.
//!
//! These calls run before sign-in, so they bypass the gateway: no bearer
//! token, API key only.

use std::time::Duration;

use cargoapp_auth::PlatformConfig;
use cargoapp_http::{HttpClient, HttpError};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::time::Instant;

use crate::gateway::{DEFAULT_TIMEOUT, remote_message};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    #[error("reset code must be exactly 6 digits")]
    InvalidResetCode,

    #[error("password must be at least 8 characters with an uppercase letter and a digit")]
    WeakPassword,

    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Exactly six ASCII digits.
pub fn is_valid_reset_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// At least 8 characters, one uppercase letter, one digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(char::is_uppercase)
        && password.chars().any(|c| c.is_ascii_digit())
}

fn with_apikey(
    req: cargoapp_http::RequestBuilder,
    config: &PlatformConfig,
) -> cargoapp_http::RequestBuilder {
    match config.anon_key() {
        Some(key) => req.header("apikey", key),
        None => req,
    }
}

async fn check_response(resp: cargoapp_http::HttpResponse) -> Result<(), AccountError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let text = resp.text().await?;
    Err(AccountError::Remote {
        status: status.as_u16(),
        message: remote_message(status.as_u16(), &text),
    })
}

/// Ask the backend to email a reset code.
pub async fn request_password_reset(
    http: &HttpClient,
    config: &PlatformConfig,
    email: &str,
) -> Result<(), AccountError> {
    let req = http
        .post(config.functions_url("request-password-reset"))
        .json(&serde_json::json!({ "email": email }))
        .timeout(DEFAULT_TIMEOUT);
    let resp = with_apikey(req, config).send().await?;
    check_response(resp).await
}

/// Submit the emailed code and the new password.
///
/// Local violations fail before any network I/O.
pub async fn verify_password_reset(
    http: &HttpClient,
    config: &PlatformConfig,
    email: &str,
    code: &str,
    new_password: &str,
) -> Result<(), AccountError> {
    if !is_valid_reset_code(code) {
        return Err(AccountError::InvalidResetCode);
    }
    if !is_strong_password(new_password) {
        return Err(AccountError::WeakPassword);
    }
    let req = http
        .post(config.functions_url("verify-password-reset"))
        .json(&serde_json::json!({
            "email": email,
            "code": code,
            "new_password": new_password,
        }))
        .timeout(DEFAULT_TIMEOUT);
    let resp = with_apikey(req, config).send().await?;
    check_response(resp).await
}

/// Client-side window between reset emails.
pub struct ResendThrottle {
    window: Duration,
    last: Mutex<Option<Instant>>,
}

impl ResendThrottle {
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last: Mutex::new(None),
        }
    }

    /// Claim the window. Returns `false` while a previous claim is still
    /// active.
    pub fn try_begin(&self) -> bool {
        let mut last = self.last.lock();
        let now = Instant::now();
        match *last {
            Some(prev) if now.duration_since(prev) < self.window => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }

    /// Whole seconds until the window reopens, rounded up.
    pub fn seconds_remaining(&self) -> u64 {
        match *self.last.lock() {
            Some(prev) => {
                let elapsed = prev.elapsed();
                if elapsed >= self.window {
                    0
                } else {
                    let rest = self.window - elapsed;
                    u64::from(rest.subsec_nanos() > 0) + rest.as_secs()
                }
            }
            None => 0,
        }
    }
}

impl Default for ResendThrottle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn reset_code_must_be_six_ascii_digits() {
        assert!(is_valid_reset_code("031337"));
        assert!(!is_valid_reset_code("12345"));
        assert!(!is_valid_reset_code("1234567"));
        assert!(!is_valid_reset_code("12345a"));
        assert!(!is_valid_reset_code("１２３４５６")); // fullwidth digits
        assert!(!is_valid_reset_code(""));
    }

    #[test]
    fn password_strength_vectors() {
        assert!(is_strong_password("Secret12"));
        assert!(is_strong_password("Ñandú123"));
        assert!(!is_strong_password("Short1"));
        assert!(!is_strong_password("alllowercase1"));
        assert!(!is_strong_password("NoDigitsHere"));
    }

    #[tokio::test(start_paused = true)]
    async fn throttle_counts_down_and_reopens() {
        let throttle = ResendThrottle::new();
        assert_eq!(throttle.seconds_remaining(), 0);
        assert!(throttle.try_begin());

        assert!(!throttle.try_begin());
        assert_eq!(throttle.seconds_remaining(), 60);

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(!throttle.try_begin());
        assert_eq!(throttle.seconds_remaining(), 15);

        tokio::time::advance(Duration::from_secs(15)).await;
        assert_eq!(throttle.seconds_remaining(), 0);
        assert!(throttle.try_begin());
    }

    #[tokio::test]
    async fn weak_password_never_reaches_the_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let http = HttpClient::builder()
            .allow_insecure_http()
            .build()
            .unwrap();
        let config = PlatformConfig::new(server.base_url(), None);
        let err = verify_password_reset(&http, &config, "a@b.com", "123456", "weak")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::WeakPassword));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn reset_request_is_unauthenticated() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/functions/v1/request-password-reset")
                    .header("apikey", "anon-key")
                    .header_missing("authorization")
                    .json_body(serde_json::json!({"email": "a@b.com"}));
                then.status(200).json_body(serde_json::json!({"sent": true}));
            })
            .await;

        let http = HttpClient::builder()
            .allow_insecure_http()
            .build()
            .unwrap();
        let config = PlatformConfig::new(server.base_url(), Some("anon-key".into()));
        request_password_reset(&http, &config, "a@b.com")
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
