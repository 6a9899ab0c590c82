//! History search, filter and pagination controller.
//!
//! Leaf to root:
//!
//! - [`debounce`]: quiescence-window gate for free text
//! - [`filter`]: filter inputs and the derived [`QueryKey`](crate::domain::QueryKey)
//! - [`fetch`]: paginated fetch sessions with a stale-response guard
//! - [`projector`]: session to view state
//! - [`header`]: header sync keyed on navigation and date
//! - [`modal`]: date picker bridge
//!
//! Nothing in this module performs I/O or reads the clock; callers pass `now`
//! and carry out the returned requests.

pub mod debounce;
pub mod fetch;
pub mod filter;
pub mod header;
pub mod modal;
pub mod projector;

pub use debounce::DebounceGate;
pub use fetch::{
    ApplyOutcome, FetchSession, FetchStatus, FetchTicket, PageRequest, PageResponse,
    PaginatedFetchController,
};
pub use filter::{FilterState, DEFAULT_DEBOUNCE};
pub use header::{HeaderBinder, HeaderConfig, HelpContent, NavigationId};
pub use modal::{ModalBridge, ModalKind, ModalRequest};
pub use projector::{project, ViewState};
