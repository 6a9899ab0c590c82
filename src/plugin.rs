//! Zellij plugin wrapper.
//!
//! Thin integration layer between the library and the Zellij runtime. It
//! translates Zellij events into library events, runs them through
//! `handle_event`, and implements every port with Zellij host calls:
//!
//! | Port | Zellij call |
//! |------|-------------|
//! | `AuthCollaborator`, `DataFetcher`, `TaskCommands` | `web_request` |
//! | `Scheduler` | `set_timeout` |
//! | `Navigator` | `pipe_message_to_plugin`, `hide_self` |
//! | `ModalHost` | in-plugin [`ModalStack`] |
//!
//! Ports never call back into the handler. Results that are known at once
//! (e.g. a request URL that cannot be built) are queued and dispatched after
//! the current batch of actions.
//!
//! # Event Mapping
//!
//! - `PermissionRequestResult(Granted)` → `Event::Mount`
//! - `Visible(true)` → `Event::FocusGained`, or `Event::Mount` on a fresh
//!   state after an unmount
//! - `Timer` → `Event::Tick`
//! - `WebRequestResult` → `AuthResolved` / `PageLoaded` / `TaskReused`,
//!   routed by the request context
//! - pipe `taskhistory::navigation` → `NavigationChanged`, `taskhistory::unmount` → `Unmount`
//!
//! # Keybindings
//!
//! Global: `Ctrl+n` / `Ctrl+p` move the selection.
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Open task info
//! - `e`: Edit task, `u`: Re-use task
//! - `Tab`: Toggle task / group
//! - `/`: Search
//! - `c`: Calendar
//! - `?`: Help
//! - `q`: Close
//!
//! Search typing: characters edit the query, `Backspace` deletes, `Ctrl+u`
//! clears, `Enter` focuses the results, `Esc` leaves search.
//!
//! Calendar: `h`/`l`/`Left`/`Right` by day, `j`/`k`/`Down`/`Up` by week,
//! `[`/`]` by month, `Enter` picks, `Esc` closes.

use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use zellij_tile::prelude::*;

use taskhistory::api::{self, Endpoints, RequestContext};
use taskhistory::domain::FetchError;
use taskhistory::history::{HeaderConfig, ModalKind, ModalRequest, NavigationId, PageRequest, PageResponse};
use taskhistory::modals::{CalendarKey, CalendarOutcome, ModalStack};
use taskhistory::ports::{self, AuthCollaborator, DataFetcher, ModalHost, Navigator, Scheduler, TaskCommands};
use taskhistory::ui::Overlay;
use taskhistory::{handle_event, AppState, AuthState, Config, Event, InputMode, Route, SearchFocus};

const NAVIGATION_PIPE: &str = "taskhistory::navigation";
const UNMOUNT_PIPE: &str = "taskhistory::unmount";

/// Plugin state wrapper.
pub struct HistoryPlugin {
    /// Core application state from the library layer.
    app: AppState,

    config: Config,

    /// `None` when the configured base URL is unusable; requests then fail
    /// immediately.
    endpoints: Option<Endpoints>,

    modals: ModalStack,

    /// Header options last pushed through the navigator port.
    header: Option<HeaderConfig>,

    show_help: bool,

    /// Set once the host granted the requested permissions.
    permitted: bool,

    /// Events produced while executing actions, dispatched afterwards.
    queued: VecDeque<Event>,
}

impl Default for HistoryPlugin {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: taskhistory::initialize(&config, today()),
            config,
            endpoints: None,
            modals: ModalStack::new(),
            header: None,
            show_help: false,
            permitted: false,
            queued: VecDeque::new(),
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl ZellijPlugin for HistoryPlugin {
    /// Parses configuration, builds the endpoints, requests permissions and
    /// subscribes to events. The screen mounts once permissions are granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        taskhistory::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.endpoints = Endpoints::from_config(&config)
            .inspect_err(|e| tracing::error!(error = %e, "invalid backend configuration"))
            .ok();
        self.app = taskhistory::initialize(&config, today());
        self.config = config;

        request_permission(&[PermissionType::WebAccess, PermissionType::MessageAndLaunchOtherPlugins]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::Visible,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let _guard = tracing::debug_span!("plugin_update", event_type = %event_name(&event)).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(key) => return self.handle_key(&key),
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                self.permitted = true;
                Event::Mount {
                    navigation: NavigationId(get_plugin_ids().plugin_id),
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied - the history cannot be loaded");
                return false;
            }
            zellij_tile::prelude::Event::Visible(true) if self.permitted && !self.app.mounted => {
                // shown again after an unmount pipe: start over on today's date
                self.app = taskhistory::initialize(&self.config, today());
                Event::Mount {
                    navigation: NavigationId(get_plugin_ids().plugin_id),
                }
            }
            zellij_tile::prelude::Event::Visible(true) => Event::FocusGained,
            zellij_tile::prelude::Event::Timer(_) => Event::Tick { now: Instant::now() },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match map_web_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        self.dispatch(our_event)
    }

    fn pipe(&mut self, message: PipeMessage) -> bool {
        let event = match message.name.as_str() {
            NAVIGATION_PIPE => {
                let Some(id) = message.payload.as_deref().and_then(|p| p.trim().parse().ok()) else {
                    tracing::warn!(payload = ?message.payload, "navigation pipe without a numeric id");
                    return false;
                };
                Event::NavigationChanged(NavigationId(id))
            }
            UNMOUNT_PIPE => Event::Unmount,
            _ => return false,
        };
        self.dispatch(event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        let overlay = Overlay {
            header: self.header.as_ref(),
            calendar: self.modals.calendar(),
            show_help: self.show_help,
        };
        taskhistory::ui::render(&self.app, &overlay, rows, cols);
    }
}

impl HistoryPlugin {
    /// Runs `event` and everything it queues through the handler, executing
    /// the resulting actions in order. Returns whether to re-render.
    fn dispatch(&mut self, event: Event) -> bool {
        let mut should_render = false;
        self.queued.push_back(event);

        while let Some(event) = self.queued.pop_front() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), render, "event handled");
                    should_render |= render || !actions.is_empty();
                    ports::execute_all(&actions, self);
                }
                Err(e) => tracing::warn!(error = %e, "error handling event"),
            }
        }
        should_render
    }

    fn handle_key(&mut self, key: &KeyWithModifier) -> bool {
        if self.modals.calendar().is_some() {
            let Some(calendar_key) = calendar_key(key) else {
                return false;
            };
            return match self.modals.handle_calendar_key(calendar_key) {
                Some(CalendarOutcome::Moved) => true,
                Some(CalendarOutcome::Committed(date)) => {
                    self.dispatch(Event::CalendarCommitted(date));
                    true
                }
                Some(CalendarOutcome::Dismissed) => {
                    self.dispatch(Event::CalendarDismissed);
                    true
                }
                Some(CalendarOutcome::Unchanged) | None => false,
            };
        }

        if key.bare_key == BareKey::Char('?') && self.app.input_mode == InputMode::Normal {
            self.show_help = !self.show_help;
            return true;
        }

        match self.map_key(key) {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    /// Maps a key press to an application event for the current input mode.
    fn map_key(&self, key: &KeyWithModifier) -> Option<Event> {
        let now = Instant::now();
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('u') if self.app.input_mode.is_typing() => Some(Event::ClearSearch { now }),
                _ => None,
            };
        }

        let mode = self.app.input_mode;
        if mode.is_typing() {
            return Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::FocusResults,
                BareKey::Tab => Event::ToggleGrouping,
                BareKey::Backspace => Event::SearchBackspace { now },
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::SearchChar { c, now },
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenTask,
            BareKey::Char('e') => Event::EditTask,
            BareKey::Char('u') => Event::ReuseTask,
            BareKey::Tab => Event::ToggleGrouping,
            BareKey::Char('c') => Event::OpenCalendar { today: today() },
            BareKey::Char('/') => match mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Esc if mode == InputMode::Search(SearchFocus::Navigating) => Event::ExitSearch,
            BareKey::Char('q') if mode == InputMode::Normal => Event::CloseFocus,
            _ => return None,
        })
    }

    fn send(&self, url: &url::Url, verb: HttpVerb, context: &RequestContext) {
        web_request(
            url.as_str(),
            verb,
            api::request::headers(self.config.api_token.as_deref()),
            vec![],
            context.to_context(),
        );
    }

    /// Pipes `payload` to the navigation plugin, if one is configured.
    fn pipe_to_navigation(&self, name: &str, payload: serde_json::Value) {
        let Some(plugin_url) = &self.config.navigation_plugin else {
            tracing::debug!(name, %payload, "no navigation plugin configured");
            return;
        };
        pipe_message_to_plugin(
            MessageToPlugin::new(name)
                .with_plugin_url(plugin_url)
                .with_payload(payload.to_string()),
        );
    }
}

impl AuthCollaborator for HistoryPlugin {
    fn resolve_auth(&mut self) {
        match &self.endpoints {
            Some(endpoints) => self.send(&endpoints.auth_url(), HttpVerb::Get, &RequestContext::Auth),
            None => self.queued.push_back(Event::AuthResolved(AuthState::Error {
                message: "backend is not configured".to_string(),
            })),
        }
    }
}

impl DataFetcher for HistoryPlugin {
    fn fetch_page(&mut self, request: &PageRequest) {
        let Some(endpoints) = &self.endpoints else {
            self.queued.push_back(Event::PageLoaded(PageResponse {
                ticket: request.ticket,
                result: Err(FetchError::Transport("backend is not configured".to_string())),
            }));
            return;
        };
        tracing::debug!(ticket = %request.ticket, key = %request.key, "fetching page");
        self.send(&endpoints.page_url(request), HttpVerb::Get, &RequestContext::Page(request.ticket));
    }
}

impl TaskCommands for HistoryPlugin {
    fn reuse(&mut self, task_id: &str) {
        let url = self.endpoints.as_ref().map(|endpoints| endpoints.reuse_url(task_id));
        match url {
            Some(Ok(url)) => self.send(
                &url,
                HttpVerb::Post,
                &RequestContext::Reuse {
                    task_id: task_id.to_string(),
                },
            ),
            Some(Err(e)) => tracing::warn!(task_id, error = %e, "cannot build reuse URL"),
            None => tracing::warn!(task_id, "backend is not configured"),
        }
    }
}

impl Navigator for HistoryPlugin {
    fn set_options(&mut self, header: &HeaderConfig) {
        self.pipe_to_navigation(
            "set_options",
            serde_json::json!({
                "title": header.title,
                "selectedDate": header.selected_date,
                "dateLabel": header.date_label,
                "help": { "title": header.help.title, "description": header.help.description },
            }),
        );
        self.header = Some(header.clone());
    }

    fn navigate(&mut self, route: &Route) {
        match serde_json::to_value(route) {
            Ok(payload) => self.pipe_to_navigation("navigate", payload),
            Err(e) => tracing::warn!(error = %e, screen = route.screen(), "failed to encode route"),
        }
    }

    fn close(&mut self) {
        self.show_help = false;
        hide_self();
    }
}

impl ModalHost for HistoryPlugin {
    fn present(&mut self, request: ModalRequest) {
        self.modals.present(request);
    }

    fn dismiss(&mut self, kind: ModalKind) {
        self.modals.dismiss(kind);
    }
}

impl Scheduler for HistoryPlugin {
    fn arm(&mut self, after: Duration) {
        set_timeout(after.as_secs_f64());
    }
}

fn map_web_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
    match RequestContext::from_context(context)? {
        RequestContext::Auth => Some(Event::AuthResolved(api::decode_auth(status, body))),
        RequestContext::Page(ticket) => Some(Event::PageLoaded(PageResponse {
            ticket,
            result: api::decode_page(status, body),
        })),
        RequestContext::Reuse { task_id } if api::reuse_succeeded(status) => {
            tracing::debug!(%task_id, "task re-used");
            Some(Event::TaskReused)
        }
        RequestContext::Reuse { task_id } => {
            tracing::warn!(%task_id, status, "re-using task failed");
            None
        }
    }
}

fn calendar_key(key: &KeyWithModifier) -> Option<CalendarKey> {
    Some(match key.bare_key {
        BareKey::Left | BareKey::Char('h') => CalendarKey::PrevDay,
        BareKey::Right | BareKey::Char('l') => CalendarKey::NextDay,
        BareKey::Up | BareKey::Char('k') => CalendarKey::PrevWeek,
        BareKey::Down | BareKey::Char('j') => CalendarKey::NextWeek,
        BareKey::Char('[') => CalendarKey::PrevMonth,
        BareKey::Char(']') => CalendarKey::NextMonth,
        BareKey::Enter => CalendarKey::Commit,
        BareKey::Esc | BareKey::Char('q') => CalendarKey::Cancel,
        _ => return None,
    })
}

/// Short event name for span fields.
fn event_name(event: &zellij_tile::prelude::Event) -> String {
    match event {
        zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
        zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
        zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
        zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
        zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
        _ => "Other".to_string(),
    }
}
