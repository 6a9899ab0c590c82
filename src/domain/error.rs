//! Error types for the task history plugin.
//!
//! This module defines the crate-wide error type [`HistoryError`], the
//! page-fetch failure type [`FetchError`], and a [`Result`] alias. All errors
//! use `thiserror` for their `Error` implementations.

use thiserror::Error;

/// Failure of a single page fetch.
///
/// A `FetchError` never escapes the fetch controller as a Rust error: it is
/// stored on the owning session and moves that session into the error status,
/// where the view projects it to an error affordance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The backend answered with a non-success HTTP status.
    #[error("backend responded with HTTP {status}")]
    Http {
        /// HTTP status code returned by the backend.
        status: u16,
    },

    /// The request never produced a usable response (DNS, connection, host error).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be decoded into a page.
    #[error("malformed page payload: {0}")]
    Decode(String),
}

/// The main error type for plugin operations.
///
/// Most variants wrap an underlying error from an external crate via
/// `#[from]` so call sites can propagate with `?`.
///
/// # Examples
///
/// ```
/// use taskhistory::domain::HistoryError;
///
/// fn require_base_url(value: Option<&str>) -> Result<&str, HistoryError> {
///     value.ok_or_else(|| HistoryError::Config("api_base_url is empty".to_string()))
/// }
///
/// assert!(require_base_url(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A page or auth request failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A JSON payload could not be parsed or produced.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for plugin operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
