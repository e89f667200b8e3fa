//! Request construction and dispatch.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http_body_util::Full;
use serde::Serialize;

use crate::client::ClientInner;
use crate::error::HttpError;
use crate::response::HttpResponse;

enum BodyKind {
    Empty,
    Bytes(Bytes),
    Json(Bytes),
}

/// Builder for a single HTTP request.
///
/// Errors from header conversion or body serialization are deferred and
/// surfaced by [`send`](RequestBuilder::send), keeping the chain infallible.
pub struct RequestBuilder {
    client: Arc<ClientInner>,
    method: http::Method,
    url: String,
    headers: HeaderMap,
    body: BodyKind,
    timeout: Option<Duration>,
    pending_error: Option<HttpError>,
}

impl RequestBuilder {
    pub(crate) fn new(client: Arc<ClientInner>, method: http::Method, url: String) -> Self {
        Self {
            client,
            method,
            url,
            headers: HeaderMap::new(),
            body: BodyKind::Empty,
            timeout: None,
            pending_error: None,
        }
    }

    /// Set a header. Invalid names or values fail the eventual `send`.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if self.pending_error.is_some() {
            return self;
        }
        let name = match HeaderName::try_from(name.as_ref()) {
            Ok(n) => n,
            Err(e) => {
                self.pending_error = Some(e.into());
                return self;
            }
        };
        match HeaderValue::try_from(value.as_ref()) {
            Ok(v) => {
                self.headers.insert(name, v);
            }
            Err(e) => self.pending_error = Some(e.into()),
        }
        self
    }

    /// Set `Authorization: Bearer <token>`.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        if self.pending_error.is_some() {
            return self;
        }
        match HeaderValue::try_from(format!("Bearer {}", token.as_ref())) {
            Ok(v) => {
                self.headers.insert(AUTHORIZATION, v);
            }
            Err(e) => self.pending_error = Some(e.into()),
        }
        self
    }

    /// Serialize `value` as the JSON request body.
    ///
    /// Sets `Content-Type: application/json` unless a content type was set
    /// explicitly.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        if self.pending_error.is_some() {
            return self;
        }
        match serde_json::to_vec(value) {
            Ok(buf) => self.body = BodyKind::Json(Bytes::from(buf)),
            Err(e) => self.pending_error = Some(e.into()),
        }
        self
    }

    /// Set a raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = BodyKind::Bytes(body.into());
        self
    }

    /// Abort if the response head has not arrived within `timeout`.
    ///
    /// The timer covers connection setup and response headers only; body
    /// streaming is not bounded here.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Dispatch the request and return the response head.
    pub async fn send(mut self) -> Result<HttpResponse, HttpError> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }

        let uri = self.validated_uri()?;

        if let BodyKind::Json(_) = self.body
            && !self.headers.contains_key(CONTENT_TYPE)
        {
            self.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let body = match self.body {
            BodyKind::Empty => Full::new(Bytes::new()),
            BodyKind::Bytes(b) | BodyKind::Json(b) => Full::new(b),
        };

        let mut req = http::Request::builder()
            .method(self.method.clone())
            .uri(uri)
            .body(body)?;
        *req.headers_mut() = self.headers;

        tracing::debug!(method = %self.method, url = %self.url, "sending request");

        let fut = self.client.hyper.request(req);
        let response = match self.timeout {
            Some(t) => tokio::time::timeout(t, fut)
                .await
                .map_err(|_| HttpError::Timeout(t))??,
            None => fut.await?,
        };

        Ok(HttpResponse::new(response, self.client.max_body_size))
    }

    fn validated_uri(&self) -> Result<http::Uri, HttpError> {
        let uri: http::Uri = self.url.parse().map_err(|e: http::uri::InvalidUri| {
            HttpError::InvalidUri {
                url: self.url.clone(),
                reason: e.to_string(),
            }
        })?;

        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: self.url.clone(),
                reason: "missing host".into(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") if self.client.allow_insecure => Ok(uri),
            Some("http") => Err(HttpError::InvalidScheme {
                scheme: "http".into(),
                reason: "plain HTTP is disabled; enable allow_insecure_http for local testing"
                    .into(),
            }),
            other => Err(HttpError::InvalidScheme {
                scheme: other.unwrap_or("").into(),
                reason: "only http(s) URLs are supported".into(),
            }),
        }
    }
}
