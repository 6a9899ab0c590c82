//! HTTP codec for the task backend.
//!
//! Pure functions that turn page requests into URLs and headers, and turn raw
//! `(status, body)` pairs back into domain values. The plugin shim hands the
//! results to Zellij's `web_request` and feeds the decoded values back into
//! the handler.
//!
//! - [`request`]: endpoint URLs, headers and request context
//! - [`response`]: page and auth decoding

pub mod request;
pub mod response;

pub use request::{Endpoints, RequestContext};
pub use response::{decode_auth, decode_page, reuse_succeeded};
