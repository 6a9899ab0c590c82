//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges and
//! selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data. The
//! list area is a [`BodyView`], one variant per projected view state.
//!
//! # Example
//!
//! ```rust
//! use taskhistory::ui::viewmodel::{BodyView, EmptyState};
//!
//! let body = BodyView::Empty(EmptyState {
//!     message: "Nothing archived".to_string(),
//!     subtitle: "Pick another day with 'c'".to_string(),
//! });
//! assert!(matches!(body, BodyView::Empty(_)));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Grouping toggle shown above the search box.
    pub toggle: ToggleInfo,

    /// Search box state.
    pub search_bar: SearchBarInfo,

    /// Content below the filter bar.
    pub body: BodyView,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Two-option grouping selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleInfo {
    /// `(label, is_active)` per option, in display order.
    pub options: Vec<(String, bool)>,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Raw search text as typed.
    pub query: String,

    /// Shown dimmed while `query` is empty; depends on the grouping mode.
    pub placeholder: String,

    /// Whether the search box currently receives key presses.
    pub focused: bool,

    /// A search edit is waiting for the debounce window.
    pub pending: bool,
}

/// What to draw below the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// Nothing requested yet.
    Idle,
    /// First page in flight.
    Spinner,
    Empty(EmptyState),
    Error(ErrorInfo),
    List(ListInfo),
}

/// Rows of the history list within the visible window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInfo {
    /// Heading above the rows, e.g. ` Archived tasks (12) · manager `.
    pub heading: String,

    pub items: Vec<DisplayItem>,

    /// Index of the selected row within `items`.
    pub selected_index: usize,

    /// Trailing status line (`Loading more…`, `↓ more`), if any.
    pub status: Option<String>,
}

/// Display information for a single archived task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Task (or group) title, truncated to the title column.
    pub title: String,

    /// Group name or the person who completed the task.
    pub subtitle: String,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Character ranges of `title` that match the effective search text.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No archived tasks").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Fetch failure shown in place of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub hint: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: search").
    pub keybindings: String,
}
