//! Domain layer for the task history plugin.
//!
//! Core types of the history screen, independent of Zellij APIs and of the
//! HTTP codec.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`task`]: Archived task model
//! - [`query`]: Grouping mode, query key and wire parameters
//! - [`page`]: Result pages and continuation cursors
//! - [`auth`]: Authentication status
//! - [`route`]: Navigation destinations
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use taskhistory::domain::{GroupingMode, QueryKey};
//!
//! let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let key = QueryKey::new("milk", GroupingMode::Single, date);
//! assert_eq!(key.params().date, "2026-10-16");
//! ```

pub mod auth;
pub mod error;
pub mod page;
pub mod query;
pub mod route;
pub mod task;

pub use auth::AuthState;
pub use error::{FetchError, HistoryError, Result};
pub use page::{Cursor, Page};
pub use query::{GroupingMode, QueryKey, QueryParams};
pub use route::Route;
pub use task::ArchivedTask;
