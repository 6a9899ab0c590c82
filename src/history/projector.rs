//! Projection of a fetch session onto what the list area should show.

use super::fetch::{FetchSession, FetchStatus};
use crate::domain::ArchivedTask;

/// What the area below the filter bar renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<'a> {
    /// No fetch has been started.
    Idle,
    /// First page of the current key is loading.
    Spinner,
    List {
        items: Vec<&'a ArchivedTask>,
        loading_more: bool,
        has_next_page: bool,
    },
    /// The current key loaded successfully with no results.
    Empty,
    Error {
        message: String,
    },
}

impl ViewState<'_> {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    /// Number of rows the list shows; zero for every non-list state.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::List { items, .. } => items.len(),
            _ => 0,
        }
    }
}

/// Derives the view state from the current session.
///
/// Pure: the same session always projects to the same state. An errored
/// session never projects to [`ViewState::Empty`], so a failure is never
/// shown as "no results".
#[must_use]
pub fn project(session: Option<&FetchSession>) -> ViewState<'_> {
    let Some(session) = session else {
        return ViewState::Idle;
    };

    match session.status() {
        FetchStatus::Idle => ViewState::Idle,
        FetchStatus::Loading => ViewState::Spinner,
        FetchStatus::Error => ViewState::Error {
            message: session
                .error()
                .map_or_else(|| "Failed to load history".to_string(), ToString::to_string),
        },
        FetchStatus::Success if session.item_count() == 0 => ViewState::Empty,
        FetchStatus::LoadingMore if session.item_count() == 0 => ViewState::Spinner,
        status @ (FetchStatus::Success | FetchStatus::LoadingMore) => ViewState::List {
            items: session.items().collect(),
            loading_more: status == FetchStatus::LoadingMore,
            has_next_page: session.has_next_page(),
        },
    }
}
