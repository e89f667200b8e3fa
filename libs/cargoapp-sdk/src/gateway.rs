//! The remote-call gateway.
//!
//! Every named backend function goes through [`Gateway::invoke`]: session
//! check first (no network while signed out), bearer + API-key headers, one
//! wire call bounded by a single deadline, and a uniform mapping of the
//! response into JSON or a [`GatewayError`].

use std::time::Duration;

use bytes::Bytes;
use cargoapp_auth::{PlatformConfig, SessionProvider};
use cargoapp_http::{HttpClient, HttpError, Method};
use serde_json::{Value, json};

use crate::error::GatewayError;
use crate::query::build_query;

/// Default deadline for a remote function call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Request body for a remote function.
#[derive(Clone, Debug)]
pub enum FunctionBody {
    Json(Value),
    Raw(Bytes),
}

/// A call to a named remote function.
#[derive(Clone, Debug)]
pub struct FunctionRequest {
    pub(crate) name: String,
    pub(crate) method: Method,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<FunctionBody>,
    pub(crate) query: Vec<(String, Option<String>)>,
    pub(crate) timeout: Duration,
}

impl FunctionRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: Method::GET,
            headers: Vec::new(),
            body: None,
            query: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Shorthand for a POST with a JSON body.
    pub fn post_json(name: impl Into<String>, body: Value) -> Self {
        Self::new(name).method(Method::POST).json(body)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(FunctionBody::Json(body));
        self
    }

    /// Raw body, sent as-is with no forced content type.
    pub fn raw(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(FunctionBody::Raw(body.into()));
        self
    }

    /// Add a query parameter. `None` and empty values are dropped at build
    /// time.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Option<String>>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header. Caller headers win over the gateway defaults on key
    /// collision.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Authenticated dispatcher for remote function calls.
pub struct Gateway<P: SessionProvider> {
    http: HttpClient,
    config: PlatformConfig,
    sessions: P,
}

impl<P: SessionProvider> Gateway<P> {
    pub fn new(http: HttpClient, config: PlatformConfig, sessions: P) -> Self {
        Self {
            http,
            config,
            sessions,
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Call a named remote function.
    ///
    /// Exactly one outbound request per call; no internal retries. The whole
    /// call (send plus body read) races one deadline, released on every exit
    /// path when the race future drops.
    pub async fn invoke(&self, req: FunctionRequest) -> Result<Value, GatewayError> {
        if req.name.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("function name is empty".into()));
        }

        let session = self.sessions.session().await?;
        let Some(session) = session else {
            return Err(GatewayError::NoSession);
        };
        if session.access_token.is_empty() {
            return Err(GatewayError::NoSession);
        }

        let url = format!(
            "{}{}",
            self.config.functions_url(&req.name),
            build_query(&req.query)
        );

        let mut builder = self
            .http
            .request(req.method.clone(), url)
            .bearer_auth(&session.access_token);
        if let Some(key) = self.config.anon_key() {
            builder = builder.header("apikey", key);
        }
        match req.body {
            Some(FunctionBody::Json(value)) => builder = builder.json(&value),
            Some(FunctionBody::Raw(bytes)) => builder = builder.body(bytes),
            None => {}
        }
        // Applied after the defaults so callers can override them.
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        tracing::debug!(function = %req.name, method = %req.method, "invoking remote function");

        let call = async {
            let resp = builder.send().await?;
            let status = resp.status();
            let text = resp.text().await?;
            Ok::<_, HttpError>((status, text))
        };
        let (status, text) = tokio::time::timeout(req.timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout(req.timeout))?
            .map_err(GatewayError::Network)?;

        if !status.is_success() {
            return Err(GatewayError::Remote {
                status: status.as_u16(),
                message: remote_message(status.as_u16(), &text),
            });
        }
        Ok(parse_success_body(&text))
    }
}

/// A 2xx body: empty → `{}`, JSON → as-is, anything else wrapped unparsed.
fn parse_success_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

/// Extract the human-readable message from an error body.
pub(crate) fn remote_message(status: u16, text: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str(text) {
        for key in ["error", "message", "msg"] {
            if let Some(Value::String(s)) = map.get(key) {
                return s.clone();
            }
        }
    }
    format!("Error {status}")
}
