//! Remote-call gateway and typed client surface for the CargoApp backend.
//!
//! The pieces, bottom up:
//!
//! - [`Gateway`] dispatches calls to named remote functions: session check
//!   first, bearer + API-key headers, one wire request per call under a
//!   single deadline, uniform JSON/error mapping.
//! - [`ListPager`] drives paginated lists over any page-fetch function, with
//!   stale-result discard, a bounded retry while a session is still
//!   initializing, and a debounced refresh for text search.
//! - [`functions`] holds typed wrappers for every backend function, one
//!   module per entity.
//! - [`account`] covers the pre-auth password-reset flow, [`validation`] the
//!   client-side form checks.

pub mod account;
mod error;
pub mod functions;
mod gateway;
pub mod pager;
mod query;
pub mod validation;

pub use error::GatewayError;
pub use gateway::{DEFAULT_TIMEOUT, FunctionBody, FunctionRequest, Gateway};
pub use pager::{ListPage, ListPager, PageRequest, PagerState, SEARCH_DEBOUNCE};
pub use query::{build_query, param};
