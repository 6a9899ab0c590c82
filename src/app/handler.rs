//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and
//! collaborator results, translating them into state changes and action
//! sequences. It is the only place where the history components are wired to
//! each other.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and its components
//! 4. Actions are collected and returned for execution
//!
//! After any event that can change the query key, the handler re-derives the
//! key and lets the fetch controller decide whether a new session starts. The
//! header is re-synced the same way after date or navigation changes. Search
//! edits never touch the header.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `NavigationChanged`, `FocusGained`, `Unmount`
//! - **Collaborators**: `AuthResolved`, `PageLoaded`, `TaskReused`, `Tick`
//! - **Filters**: `SearchChar`, `SearchBackspace`, `ClearSearch`, `ToggleGrouping`
//! - **Calendar**: `OpenCalendar`, `CalendarCommitted`, `CalendarDismissed`
//! - **List**: `KeyDown`, `KeyUp`, `OpenTask`, `EditTask`, `ReuseTask`
//! - **Modes**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use std::time::Duration;
//! use taskhistory::app::{handle_event, Action, AppState, Event};
//! use taskhistory::history::NavigationId;
//! use taskhistory::ui::Theme;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let mut state = AppState::new(today, Duration::from_millis(500), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mount { navigation: NavigationId(1) })?;
//! assert_eq!(actions[0], Action::RequestAuth);
//! # Ok::<(), taskhistory::HistoryError>(())
//! ```

use super::actions::Action;
use super::modes::{InputMode, SearchFocus};
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{AuthState, Route};
use crate::history::{ApplyOutcome, ModalKind, NavigationId, PageResponse};
use chrono::NaiveDate;
use std::time::Instant;

/// Events triggered by user input, timers, or collaborator results.
///
/// Events that depend on the clock carry `now` so the handler itself never
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The screen became active inside a navigation host.
    ///
    /// Requests the auth status and pushes the initial header.
    Mount {
        navigation: NavigationId,
    },
    /// The navigation host identity changed.
    NavigationChanged(NavigationId),
    /// The auth collaborator answered.
    AuthResolved(AuthState),
    /// The screen regained focus; a loaded list is refreshed in the background.
    FocusGained,
    /// The screen is going away; pending work is dropped and filters return
    /// to their defaults. Nothing is fetched until the next `Mount`.
    Unmount,

    /// Appends a character to the search text.
    SearchChar {
        c: char,
        now: Instant,
    },
    /// Removes the last character from the search text.
    SearchBackspace {
        now: Instant,
    },
    /// Empties the search text.
    ClearSearch {
        now: Instant,
    },
    /// A debounce timer fired.
    Tick {
        now: Instant,
    },
    /// Switches between single tasks and groups.
    ToggleGrouping,

    /// Opens the date picker bounded by `today`.
    OpenCalendar {
        today: NaiveDate,
    },
    /// The date picker committed a date.
    CalendarCommitted(NaiveDate),
    /// The date picker was closed without a choice.
    CalendarDismissed,

    /// A page fetch finished (successfully or not).
    PageLoaded(PageResponse),

    /// Moves selection cursor down; the last row requests the next page.
    KeyDown,
    /// Moves selection cursor up.
    KeyUp,
    /// Opens the selected task's details.
    OpenTask,
    /// Opens the selected task in the editor.
    EditTask,
    /// Re-creates the selected task as a new active task.
    ReuseTask,
    /// The reuse command succeeded.
    TaskReused,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the results list (from typing mode).
    FocusResults,
    /// Leaves search mode; the search text stays applied.
    ExitSearch,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`: whether the UI changed, and the effects to run
/// in order. Either part may be empty.
///
/// # Errors
///
/// No current event fails; the `Result` keeps the runtime contract uniform
/// with the rest of the crate.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount { navigation } => {
            tracing::debug!(%navigation, "history screen mounted");
            state.navigation = Some(*navigation);
            state.mounted = true;
            let mut actions = vec![Action::RequestAuth];
            actions.extend(state.sync_header());
            Ok((true, actions))
        }
        Event::NavigationChanged(navigation) => {
            state.navigation = Some(*navigation);
            Ok((false, state.sync_header().into_iter().collect()))
        }
        Event::AuthResolved(auth) => {
            if &state.auth == auth {
                return Ok((false, vec![]));
            }
            match auth {
                AuthState::Success { role } => tracing::debug!(role = %role, "signed in"),
                AuthState::Error { message } => tracing::warn!(error = %message, "auth failed"),
                AuthState::Pending => tracing::debug!("auth pending"),
            }
            state.auth = auth.clone();
            Ok((true, state.sync_fetch().into_iter().collect()))
        }
        Event::FocusGained => {
            let Some(request) = state.fetch.refetch() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(ticket = %request.ticket, "refetching on focus");
            Ok((false, vec![Action::FetchPage(request)]))
        }
        Event::Unmount => {
            let mut actions = vec![];
            if state.unmount() {
                actions.push(Action::DismissModal(ModalKind::Calendar));
            }
            tracing::debug!("history screen unmounted");
            Ok((true, actions))
        }

        Event::SearchChar { c, now } => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.filter.push_char(*c, *now);
            Ok((true, arm_debounce(state, *now)))
        }
        Event::SearchBackspace { now } => {
            if !state.input_mode.is_typing() || state.filter.pop_char(*now).is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, arm_debounce(state, *now)))
        }
        Event::ClearSearch { now } => {
            if state.filter.clear_search(*now).is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, arm_debounce(state, *now)))
        }
        Event::Tick { now } => {
            if state.filter.poll_debounce(*now) {
                return Ok((true, state.sync_fetch().into_iter().collect()));
            }
            // an early wake-up for a superseded edit: wait for the current deadline
            let actions = arm_debounce(state, *now);
            Ok((!actions.is_empty(), actions))
        }
        Event::ToggleGrouping => {
            let next = state.filter.grouping().toggled();
            state.filter.set_grouping_mode(next);
            tracing::debug!(grouping = %next, "grouping toggled");
            Ok((true, state.sync_fetch().into_iter().collect()))
        }

        Event::OpenCalendar { today } => {
            let current = state.filter.selected_date();
            Ok((
                false,
                state
                    .modal
                    .open_date_picker(current, *today)
                    .map(Action::PresentModal)
                    .into_iter()
                    .collect(),
            ))
        }
        Event::CalendarCommitted(date) => {
            let was_open = state.modal.is_open();
            let changed = state.modal.commit(*date, &mut state.filter);
            let mut actions = vec![];
            if was_open {
                actions.push(Action::DismissModal(ModalKind::Calendar));
            }
            if changed {
                actions.extend(state.sync_header());
                actions.extend(state.sync_fetch());
            }
            Ok((was_open, actions))
        }
        Event::CalendarDismissed => {
            if !state.modal.dismiss() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![Action::DismissModal(ModalKind::Calendar)]))
        }

        Event::PageLoaded(response) => match state.fetch.apply(response.clone()) {
            ApplyOutcome::Applied => {
                state.clamp_selection();
                Ok((true, vec![]))
            }
            ApplyOutcome::Stale => Ok((false, vec![])),
        },

        Event::KeyDown => {
            let actions = state.move_selection_down().into_iter().collect();
            Ok((true, actions))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenTask => {
            let Some(task) = state.selected_task() else {
                tracing::debug!("no task selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(task_id = %task.id, "opening task");
            Ok((
                false,
                vec![Action::Navigate(Route::TaskInfo {
                    task_id: task.id.clone(),
                    date: task.date,
                })],
            ))
        }
        Event::EditTask => {
            let Some(task) = state.selected_task() else {
                return Ok((false, vec![]));
            };
            Ok((
                false,
                vec![Action::Navigate(Route::CreateOrUpdateTask {
                    task_id: task.id.clone(),
                    open_details: true,
                })],
            ))
        }
        Event::ReuseTask => {
            let Some(task) = state.selected_task() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(task_id = %task.id, "reusing task");
            Ok((
                false,
                vec![Action::ReuseTask {
                    task_id: task.id.clone(),
                }],
            ))
        }
        Event::TaskReused => Ok((false, vec![Action::Navigate(Route::Main)])),

        Event::SearchMode | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = if state.filter.search_raw().is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.filter.search_raw(), "leaving search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Arms a wake-up for the pending search edit, if any.
fn arm_debounce(state: &AppState, now: Instant) -> Vec<Action> {
    state
        .filter
        .debounce_remaining(now)
        .map(Action::ArmTimer)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArchivedTask, Cursor, FetchError, GroupingMode, Page};
    use crate::history::PageRequest;
    use crate::ui::Theme;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
    }

    fn mounted() -> AppState {
        let mut state = AppState::new(today(), Duration::from_millis(500), Theme::default());
        handle_event(&mut state, &Event::Mount { navigation: NavigationId(3) }).expect("mount");
        state
    }

    fn fetches(actions: &[Action]) -> Vec<&PageRequest> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::FetchPage(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn sign_in(state: &mut AppState) -> PageRequest {
        let (_, actions) = handle_event(
            state,
            &Event::AuthResolved(AuthState::Success { role: "member".into() }),
        )
        .expect("auth");
        fetches(&actions).first().copied().cloned().expect("first fetch")
    }

    fn respond(state: &mut AppState, request: &PageRequest, titles: &[&str], next: Option<&str>) {
        let items = titles
            .iter()
            .map(|title| ArchivedTask::new(*title, *title, today()))
            .collect();
        handle_event(
            state,
            &Event::PageLoaded(PageResponse {
                ticket: request.ticket,
                result: Ok(Page::new(items, next.map(Cursor::new))),
            }),
        )
        .expect("page");
    }

    #[test]
    fn mount_requests_auth_and_header() {
        let mut state = AppState::new(today(), Duration::from_millis(500), Theme::default());
        let (render, actions) =
            handle_event(&mut state, &Event::Mount { navigation: NavigationId(3) }).expect("mount");

        assert!(render);
        assert_eq!(actions[0], Action::RequestAuth);
        assert!(matches!(&actions[1], Action::SetHeader(h) if h.selected_date == today()));
    }

    #[test]
    fn sign_in_starts_first_fetch() {
        let mut state = mounted();
        let request = sign_in(&mut state);

        assert_eq!(request.cursor, None);
        assert_eq!(request.key.search_query(), "");
        assert_eq!(request.key.grouping(), GroupingMode::Single);
    }

    #[test]
    fn failed_auth_fetches_nothing() {
        let mut state = mounted();
        let (_, actions) = handle_event(
            &mut state,
            &Event::AuthResolved(AuthState::Error { message: "expired".into() }),
        )
        .expect("auth");
        assert!(actions.is_empty());
    }

    #[test]
    fn typing_arms_timer_and_fetches_after_tick() {
        let t0 = Instant::now();
        let mut state = mounted();
        sign_in(&mut state);
        handle_event(&mut state, &Event::SearchMode).expect("search");

        let (_, actions) = handle_event(&mut state, &Event::SearchChar { c: 'm', now: t0 }).expect("char");
        assert_eq!(actions, vec![Action::ArmTimer(Duration::from_millis(500))]);

        let (_, early) = handle_event(
            &mut state,
            &Event::Tick { now: t0 + Duration::from_millis(200) },
        )
        .expect("tick");
        assert_eq!(early, vec![Action::ArmTimer(Duration::from_millis(300))]);

        let (_, due) = handle_event(
            &mut state,
            &Event::Tick { now: t0 + Duration::from_millis(500) },
        )
        .expect("tick");
        assert_eq!(fetches(&due)[0].key.search_query(), "m");
    }

    #[test]
    fn characters_outside_search_mode_are_ignored() {
        let mut state = mounted();
        let (render, actions) =
            handle_event(&mut state, &Event::SearchChar { c: 'x', now: Instant::now() }).expect("char");
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.filter().search_raw(), "");
    }

    #[test]
    fn toggle_grouping_fetches_immediately() {
        let mut state = mounted();
        sign_in(&mut state);

        let (_, actions) = handle_event(&mut state, &Event::ToggleGrouping).expect("toggle");
        assert_eq!(fetches(&actions)[0].key.grouping(), GroupingMode::Grouped);
    }

    #[test]
    fn calendar_commit_updates_header_and_fetch() {
        let mut state = mounted();
        sign_in(&mut state);
        let yesterday = today().pred_opt().expect("date");

        let (_, open) = handle_event(&mut state, &Event::OpenCalendar { today: today() }).expect("open");
        assert!(matches!(open[0], Action::PresentModal(_)));

        let (_, actions) = handle_event(&mut state, &Event::CalendarCommitted(yesterday)).expect("commit");
        assert_eq!(actions[0], Action::DismissModal(ModalKind::Calendar));
        assert!(matches!(&actions[1], Action::SetHeader(h) if h.selected_date == yesterday));
        assert_eq!(fetches(&actions)[0].key.date(), yesterday);
    }

    #[test]
    fn committing_same_date_changes_nothing() {
        let mut state = mounted();
        sign_in(&mut state);
        handle_event(&mut state, &Event::OpenCalendar { today: today() }).expect("open");

        let (_, actions) = handle_event(&mut state, &Event::CalendarCommitted(today())).expect("commit");
        assert_eq!(actions, vec![Action::DismissModal(ModalKind::Calendar)]);
    }

    #[test]
    fn open_edit_and_reuse_use_selected_task() {
        let mut state = mounted();
        let request = sign_in(&mut state);
        respond(&mut state, &request, &["a", "b"], None);
        handle_event(&mut state, &Event::KeyDown).expect("down");

        let (_, open) = handle_event(&mut state, &Event::OpenTask).expect("open");
        assert_eq!(
            open,
            vec![Action::Navigate(Route::TaskInfo { task_id: "b".into(), date: today() })]
        );

        let (_, edit) = handle_event(&mut state, &Event::EditTask).expect("edit");
        assert_eq!(
            edit,
            vec![Action::Navigate(Route::CreateOrUpdateTask { task_id: "b".into(), open_details: true })]
        );

        let (_, reuse) = handle_event(&mut state, &Event::ReuseTask).expect("reuse");
        assert_eq!(reuse, vec![Action::ReuseTask { task_id: "b".into() }]);

        let (_, reused) = handle_event(&mut state, &Event::TaskReused).expect("reused");
        assert_eq!(reused, vec![Action::Navigate(Route::Main)]);
    }

    #[test]
    fn scrolling_to_last_row_loads_next_page() {
        let mut state = mounted();
        let request = sign_in(&mut state);
        respond(&mut state, &request, &["a", "b"], Some("c1"));

        let (_, actions) = handle_event(&mut state, &Event::KeyDown).expect("down");
        assert_eq!(fetches(&actions)[0].cursor, Some(Cursor::new("c1")));

        let (_, again) = handle_event(&mut state, &Event::KeyDown).expect("down");
        assert!(fetches(&again).is_empty());
    }

    #[test]
    fn focus_refetches_only_loaded_list() {
        let mut state = mounted();
        let request = sign_in(&mut state);
        let (_, loading) = handle_event(&mut state, &Event::FocusGained).expect("focus");
        assert!(loading.is_empty());

        respond(&mut state, &request, &["a"], None);
        let (_, actions) = handle_event(&mut state, &Event::FocusGained).expect("focus");
        assert_eq!(fetches(&actions).len(), 1);
    }

    #[test]
    fn focus_refresh_keeps_list_and_selection() {
        let mut state = mounted();
        let first = sign_in(&mut state);
        respond(&mut state, &first, &["a", "b"], Some("c1"));
        let (_, down) = handle_event(&mut state, &Event::KeyDown).expect("down");
        let second = fetches(&down)[0].clone();
        respond(&mut state, &second, &["c", "d"], None);
        handle_event(&mut state, &Event::KeyDown).expect("down");
        assert_eq!(state.selected_index, 2);

        let (_, actions) = handle_event(&mut state, &Event::FocusGained).expect("focus");
        let refresh = fetches(&actions)[0].clone();
        assert_eq!(refresh.cursor, None);
        assert!(state.view().is_list());
        assert_eq!(state.view().row_count(), 4);
        assert_eq!(state.selected_index, 2);

        respond(&mut state, &refresh, &["a", "b", "c", "d", "e"], None);
        assert_eq!(state.view().row_count(), 5);
        assert_eq!(state.selected_index, 2);
    }

    #[test]
    fn remount_starts_over_with_default_filters() {
        let mut state = mounted();
        sign_in(&mut state);
        handle_event(&mut state, &Event::ToggleGrouping).expect("toggle");
        handle_event(&mut state, &Event::Unmount).expect("unmount");

        let (_, toggled) = handle_event(&mut state, &Event::ToggleGrouping).expect("toggle");
        assert!(fetches(&toggled).is_empty());
        handle_event(&mut state, &Event::Unmount).expect("unmount");

        let (_, mount) = handle_event(&mut state, &Event::Mount { navigation: NavigationId(3) }).expect("mount");
        assert_eq!(mount[0], Action::RequestAuth);
        assert!(matches!(&mount[1], Action::SetHeader(h) if h.selected_date == today()));

        let (_, actions) = handle_event(
            &mut state,
            &Event::AuthResolved(AuthState::Success { role: "member".into() }),
        )
        .expect("auth");
        let requests = fetches(&actions);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].cursor, None);
        assert_eq!(requests[0].key.grouping(), GroupingMode::Single);
        assert_eq!(requests[0].key.search_query(), "");
        assert_eq!(requests[0].key.date(), today());
        assert_eq!(state.view(), crate::history::ViewState::Spinner);
    }

    #[test]
    fn fetch_error_keeps_filters() {
        let mut state = mounted();
        let request = sign_in(&mut state);
        handle_event(
            &mut state,
            &Event::PageLoaded(PageResponse {
                ticket: request.ticket,
                result: Err(FetchError::Http { status: 500 }),
            }),
        )
        .expect("page");

        assert_eq!(state.filter().selected_date(), today());
        let (_, actions) = handle_event(&mut state, &Event::FocusGained).expect("focus");
        assert!(actions.is_empty());
    }

    #[test]
    fn unmount_drops_pending_work() {
        let t0 = Instant::now();
        let mut state = mounted();
        let request = sign_in(&mut state);
        handle_event(&mut state, &Event::SearchMode).expect("search");
        handle_event(&mut state, &Event::SearchChar { c: 'z', now: t0 }).expect("char");
        handle_event(&mut state, &Event::OpenCalendar { today: today() }).expect("open");

        let (_, actions) = handle_event(&mut state, &Event::Unmount).expect("unmount");
        assert_eq!(actions, vec![Action::DismissModal(ModalKind::Calendar)]);

        let (_, toggled) = handle_event(&mut state, &Event::ToggleGrouping).expect("toggle");
        assert!(fetches(&toggled).is_empty());

        let (_, tick) = handle_event(&mut state, &Event::Tick { now: t0 + Duration::from_secs(1) }).expect("tick");
        assert!(tick.is_empty());
        let (render, _) = handle_event(
            &mut state,
            &Event::PageLoaded(PageResponse { ticket: request.ticket, result: Ok(Page::default()) }),
        )
        .expect("late page");
        assert!(!render);
    }
}
