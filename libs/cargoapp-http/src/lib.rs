//! Minimal asynchronous HTTPS client for the CargoApp backend platform.
//!
//! Wraps the hyper legacy connection pool with rustls (webpki roots) and a
//! small builder API:
//!
//! ```no_run
//! # async fn demo() -> Result<(), cargoapp_http::HttpError> {
//! use cargoapp_http::HttpClient;
//!
//! let client = HttpClient::new()?;
//! let resp = client
//!     .get("https://api.example.com/health")
//!     .send()
//!     .await?;
//! assert!(resp.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! Plain `http://` is rejected unless explicitly enabled for local testing,
//! and response bodies are buffered under a configurable size cap.

mod client;
mod error;
mod request;
mod response;
mod tls;

pub use client::{DEFAULT_MAX_BODY_SIZE, HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use http::{Method, StatusCode};
pub use request::RequestBuilder;
pub use response::HttpResponse;
