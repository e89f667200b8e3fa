//! HTTPS client over the hyper legacy pool.
//!
//! [`HttpClient`] is a cheap-to-clone handle around a shared connection pool.
//! Build one per process (or per backend) and hand clones to callers.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;

use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::tls;

pub(crate) type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Default cap on buffered response bodies (10 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

pub(crate) struct ClientInner {
    pub(crate) hyper: HyperClient,
    pub(crate) max_body_size: usize,
    pub(crate) allow_insecure: bool,
}

/// Asynchronous HTTPS client.
///
/// Clones share the same connection pool and configuration.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_body_size", &self.inner.max_body_size)
            .field("allow_insecure", &self.inner.allow_insecure)
            .finish()
    }
}

impl HttpClient {
    /// Create a client with default settings (HTTPS only, webpki roots).
    pub fn new() -> Result<Self, HttpError> {
        Self::builder().build()
    }

    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(http::Method::GET, url)
    }

    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(http::Method::POST, url)
    }

    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(http::Method::PUT, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(http::Method::PATCH, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(http::Method::DELETE, url)
    }

    /// Start a request with an arbitrary method.
    pub fn request(&self, method: http::Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Arc::clone(&self.inner), method, url.into())
    }
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    max_body_size: usize,
    allow_insecure: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            allow_insecure: false,
        }
    }
}

impl HttpClientBuilder {
    /// Cap on how many bytes of a response body the client will buffer.
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Allow plain `http://` URLs.
    ///
    /// Only available in debug builds or with the `allow-insecure-http`
    /// feature. Production builds reject non-TLS URLs at request time.
    #[cfg(any(debug_assertions, feature = "allow-insecure-http"))]
    pub fn allow_insecure_http(mut self) -> Self {
        self.allow_insecure = true;
        self
    }

    pub fn build(self) -> Result<HttpClient, HttpError> {
        let tls_builder = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(tls::crypto_provider())
            .map_err(|e| HttpError::Tls(Box::new(e)))?;

        let https = if self.allow_insecure {
            tls_builder.https_or_http().enable_all_versions().build()
        } else {
            tls_builder.https_only().enable_all_versions().build()
        };

        let hyper = Client::builder(TokioExecutor::new()).build::<_, Full<Bytes>>(https);

        Ok(HttpClient {
            inner: Arc::new(ClientInner {
                hyper,
                max_body_size: self.max_body_size,
                allow_insecure: self.allow_insecure,
            }),
        })
    }
}
