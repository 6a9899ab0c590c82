//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin. It owns one instance of each history component and the transient
//! UI state around them (selection, input mode, theme), and computes the view
//! model the renderer draws.
//!
//! # State Components
//!
//! - **Filter**: search text (raw and debounced), grouping mode, selected date
//! - **Fetch**: the current paginated session for the filter's query key
//! - **Header / Modal**: bindings to the externally owned header and date picker
//! - **Auth**: session status; nothing is fetched or drawn before `Success`
//! - **Selection / Input Mode**: list cursor and keybinding interpretation
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use std::time::Duration;
//! use taskhistory::app::AppState;
//! use taskhistory::ui::Theme;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let state = AppState::new(today, Duration::from_millis(500), Theme::default());
//! assert!(state.compute_viewmodel(24, 80).is_none()); // not signed in yet
//! ```

use super::actions::Action;
use super::modes::{InputMode, SearchFocus};
use crate::domain::{ArchivedTask, AuthState, GroupingMode};
use crate::history::{
    project, FilterState, HeaderBinder, ModalBridge, NavigationId, PaginatedFetchController,
    ViewState,
};
use crate::ui::helpers::{highlight_ranges, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, DisplayItem, EmptyState, ErrorInfo, FooterInfo, ListInfo, SearchBarInfo,
    ToggleInfo, UIViewModel,
};
use chrono::NaiveDate;
use std::time::Duration;

/// Rows taken by the filter bar, list heading, borders and footer.
const CHROME_ROWS: usize = 10;

/// Width of the title column in list rows.
const TITLE_COLUMN_WIDTH: usize = 44;

/// Central application state container.
///
/// Mutated only by [`handle_event`](super::handle_event). The history
/// components are private so every change goes through the handler, which is
/// what keeps the query key, the fetch session and the header in step.
#[derive(Debug)]
pub struct AppState {
    pub(crate) filter: FilterState,
    pub(crate) fetch: PaginatedFetchController,
    pub(crate) header: HeaderBinder,
    pub(crate) modal: ModalBridge,

    /// Session status reported by the auth collaborator.
    pub auth: AuthState,

    /// Identity of the navigation host, known once the plugin is mounted.
    pub navigation: Option<NavigationId>,

    /// Whether the screen is mounted. Nothing is fetched while unmounted.
    pub mounted: bool,

    /// Latest selectable date; the date a fresh mount starts on.
    pub today: NaiveDate,

    /// Zero-based index of the selected row within the accumulated items.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the mount-time state: default filters for `today`, no session,
    /// auth pending.
    #[must_use]
    pub fn new(today: NaiveDate, debounce: Duration, theme: Theme) -> Self {
        Self {
            filter: FilterState::new(today, debounce),
            fetch: PaginatedFetchController::new(),
            header: HeaderBinder::new(),
            modal: ModalBridge::new(),
            auth: AuthState::Pending,
            navigation: None,
            mounted: false,
            today,
            selected_index: 0,
            input_mode: InputMode::Normal,
            theme,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn fetch(&self) -> &PaginatedFetchController {
        &self.fetch
    }

    #[must_use]
    pub const fn modal(&self) -> &ModalBridge {
        &self.modal
    }

    /// Projected view state of the current session.
    #[must_use]
    pub fn view(&self) -> ViewState<'_> {
        project(self.fetch.session())
    }

    /// Starts a session for the current query key if it changed.
    ///
    /// Nothing is fetched while unmounted or before authentication succeeds.
    /// A new session resets the selection to the first row.
    pub(crate) fn sync_fetch(&mut self) -> Option<Action> {
        if !self.mounted {
            tracing::trace!("fetch skipped while unmounted");
            return None;
        }
        if !self.auth.is_success() {
            tracing::trace!("fetch deferred until signed in");
            return None;
        }
        let request = self.fetch.ensure_session(&self.filter.query_key())?;
        self.selected_index = 0;
        Some(Action::FetchPage(request))
    }

    /// Pushes the header when the navigation identity or the date changed.
    pub(crate) fn sync_header(&mut self) -> Option<Action> {
        let navigation = self.navigation?;
        self.header
            .sync(navigation, self.filter.selected_date())
            .map(Action::SetHeader)
    }

    /// Returns the currently selected archived task, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&ArchivedTask> {
        if !self.view().is_list() {
            return None;
        }
        self.fetch.session()?.items().nth(self.selected_index)
    }

    /// Moves the selection down one row, stopping at the last row.
    ///
    /// Reaching the last row asks the controller for the next page; the
    /// returned action is `None` whenever no page is due (already loading, no
    /// more pages, or not a list).
    pub(crate) fn move_selection_down(&mut self) -> Option<Action> {
        let count = self.view().row_count();
        if count == 0 {
            return None;
        }
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
        if self.selected_index + 1 == count {
            return self.fetch.fetch_next_page().map(Action::FetchPage);
        }
        None
    }

    /// Moves the selection up one row, stopping at the first row.
    pub(crate) fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Drops everything the screen owns: pending search edits, the fetch
    /// session, the header binding and the open date picker. Filters, auth and
    /// selection return to their mount-time defaults.
    ///
    /// Returns `true` if a date picker was open.
    pub(crate) fn unmount(&mut self) -> bool {
        self.filter.cancel_pending();
        self.fetch.cancel();
        self.header.reset();
        let picker_open = self.modal.dismiss();

        self.filter = FilterState::new(self.today, self.filter.debounce_window());
        self.auth = AuthState::Pending;
        self.navigation = None;
        self.mounted = false;
        self.selected_index = 0;
        self.input_mode = InputMode::Normal;
        picker_open
    }

    /// Keeps the selection inside the current row count.
    pub(crate) fn clamp_selection(&mut self) {
        let count = self.view().row_count();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// Returns `None` until authentication has succeeded: the screen draws
    /// nothing at all for a pending or failed sign-in.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Center the window on the selected row
    /// 3. Shift the window back if it would run past the end of the list
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> Option<UIViewModel> {
        let role = self.auth.role()?;

        Some(UIViewModel {
            toggle: self.compute_toggle(),
            search_bar: self.compute_search_bar(),
            body: self.compute_body(role, rows, cols),
            footer: self.compute_footer(),
        })
    }

    fn compute_toggle(&self) -> ToggleInfo {
        let grouping = self.filter.grouping();
        ToggleInfo {
            options: vec![
                ("Task".to_string(), grouping == GroupingMode::Single),
                ("Group".to_string(), grouping == GroupingMode::Grouped),
            ],
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let placeholder = match self.filter.grouping() {
            GroupingMode::Single => "Search tasks by name",
            GroupingMode::Grouped => "Search groups by name",
        };
        SearchBarInfo {
            query: self.filter.search_raw().to_string(),
            placeholder: placeholder.to_string(),
            focused: self.input_mode.is_typing(),
            pending: self.filter.search_raw() != self.filter.search_effective(),
        }
    }

    fn compute_body(&self, role: &str, rows: usize, cols: usize) -> BodyView {
        match self.view() {
            ViewState::Idle => BodyView::Idle,
            ViewState::Spinner => BodyView::Spinner,
            ViewState::Empty => BodyView::Empty(self.compute_empty_state()),
            ViewState::Error { message } => BodyView::Error(ErrorInfo {
                message,
                hint: "Change the search, grouping or date to try again".to_string(),
            }),
            ViewState::List {
                items,
                loading_more,
                has_next_page,
            } => {
                let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

                let selected = self.selected_index.min(items.len().saturating_sub(1));
                let mut visible_start = selected.saturating_sub(available_rows / 2);
                let visible_end = (visible_start + available_rows).min(items.len());
                if visible_end - visible_start < available_rows && items.len() >= available_rows {
                    visible_start = visible_end.saturating_sub(available_rows);
                }

                let query = self.filter.search_effective();
                let title_width = TITLE_COLUMN_WIDTH.min(cols.saturating_sub(4));
                let display_items = items[visible_start..visible_end]
                    .iter()
                    .enumerate()
                    .map(|(relative_idx, task)| {
                        let title = truncate(&task.title, title_width);
                        DisplayItem {
                            highlight_ranges: highlight_ranges(&title, query),
                            title,
                            subtitle: task.subtitle().to_string(),
                            is_selected: visible_start + relative_idx == selected,
                        }
                    })
                    .collect();

                let noun = match self.filter.grouping() {
                    GroupingMode::Single => "Archived tasks",
                    GroupingMode::Grouped => "Archived groups",
                };
                let more = if has_next_page { "+" } else { "" };
                let status = if loading_more {
                    Some("Loading more…".to_string())
                } else if has_next_page {
                    Some("↓ more".to_string())
                } else {
                    None
                };

                BodyView::List(ListInfo {
                    heading: format!(" {noun} ({}{more}) · {role} ", items.len()),
                    items: display_items,
                    selected_index: selected - visible_start,
                    status,
                })
            }
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let message = if self.filter.search_effective().is_empty() {
            "Nothing archived on this day".to_string()
        } else {
            format!("No matches for \"{}\"", self.filter.search_effective())
        };
        EmptyState {
            message,
            subtitle: "Press 'c' to pick another day".to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: leave search  Enter: results  Tab: task/group  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: leave search  /: edit query  j/k: navigate  Enter: open  e: edit  u: reuse"
            }
            InputMode::Normal => {
                "j/k: navigate  /: search  Tab: task/group  c: calendar  Enter: open  e: edit  u: reuse  ?: help  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
