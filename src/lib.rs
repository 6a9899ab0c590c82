//! Taskhistory: a Zellij plugin for browsing archived tasks.
//!
//! The plugin lists tasks archived on a chosen day and provides:
//! - Debounced search by title
//! - A Task / Group toggle switching between single tasks and task groups
//! - A calendar modal for picking another day
//! - Infinite scrolling over cursor-paginated backend results
//! - Open, edit and re-use commands for the selected task

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs, plugin.rs)            │  ← Entry point
//! │  - implements every port with host calls            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, actions, view model              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ History       │   │ Ports (ports/)│   │ UI Layer      │
//! │ (history/)    │   │ - traits      │   │ (ui/, modals/)│
//! │ - filter      │   │ - execute     │   │ - Rendering   │
//! │ - debounce    │   ├───────────────┤   │ - Theming     │
//! │ - pagination  │   │ HTTP codec    │   │ - Calendar    │
//! │ - projection  │   │ (api/)        │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - tasks, query keys, pages, errors (domain/)       │
//! │  - sandbox paths (infrastructure/)                  │
//! │  - OTLP file tracing (observability/)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`history`]: Filter, debounce, fetch, projection, header and modal bindings
//! - [`ports`]: Collaborator traits and action execution
//! - [`api`]: Backend URLs and response decoding
//! - [`domain`]: Core domain types (tasks, queries, pages, errors)
//! - [`modals`]: In-plugin modal host and the calendar
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Sandbox paths
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/taskhistory.wasm" {
//!         api_base_url "https://tasks.example.com/api/"
//!         api_token "..."
//!         debounce_ms "500"
//!         page_size "20"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use std::time::Instant;
//! use taskhistory::{handle_event, initialize, AuthState, Config, Event};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let mut state = initialize(&Config::default(), today);
//!
//! let events = vec![
//!     Event::AuthResolved(AuthState::Success { role: "member".to_string() }),
//!     Event::SearchChar { c: 'm', now: Instant::now() },
//! ];
//! for event in events {
//!     let (_redraw, actions) = handle_event(&mut state, &event)?;
//!     // Execute actions through `ports::execute`...
//!     # let _ = actions;
//! }
//! # Ok::<(), taskhistory::HistoryError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - The library itself is host-independent and tested natively

pub mod api;
pub mod app;
pub mod domain;
pub mod history;
pub mod infrastructure;
pub mod modals;
pub mod ports;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{ArchivedTask, AuthState, GroupingMode, HistoryError, QueryKey, Result, Route};
pub use ui::Theme;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default quiescence window for search edits, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/taskhistory.wasm" {
///     api_base_url "https://tasks.example.com/api/"
///     history_path "archived-tasks"
///     auth_path "auth/session"
///     navigation_plugin "file:/path/to/navigator.wasm"
///     theme_file "~/.config/taskhistory/theme.toml"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL every endpoint path is resolved against.
    pub api_base_url: String,

    /// Path of the paginated history endpoint.
    pub history_path: String,

    /// Path of the session endpoint.
    pub auth_path: String,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,

    /// Quiescence window before a search edit takes effect.
    pub debounce: Duration,

    /// `limit` sent with each page request.
    pub page_size: u32,

    /// URL of the plugin that owns navigation and the screen header.
    ///
    /// When unset, navigation requests are only logged and the header is drawn
    /// by this plugin alone.
    pub navigation_plugin: Option<String>,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api/".to_string(),
            history_path: "archived-tasks".to_string(),
            auth_path: "auth/session".to_string(),
            api_token: None,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            page_size: DEFAULT_PAGE_SIZE,
            navigation_plugin: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - Missing, blank or unparseable values fall back to their defaults
    /// - `debounce_ms`: milliseconds as `u64`
    /// - `page_size`: `u32`, at least 1
    /// - `theme`: stored as `theme_name`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use taskhistory::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    /// map.insert("page_size".to_string(), "abc".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.debounce, Duration::from_millis(250));
    /// assert_eq!(config.page_size, 20);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let debounce = text("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .map_or(defaults.debounce, Duration::from_millis);

        let page_size = text("page_size")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.page_size);

        Self {
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            history_path: text("history_path").unwrap_or(defaults.history_path),
            auth_path: text("auth_path").unwrap_or(defaults.auth_path),
            api_token: text("api_token"),
            debounce,
            page_size,
            navigation_plugin: text("navigation_plugin"),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Resolves the configured theme, falling back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::resolve_host_path(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the application state for a screen opened on `today`.
///
/// The selected date starts at `today`, which is also the latest date the
/// calendar offers. Nothing is fetched until auth resolves.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use taskhistory::{initialize, Config};
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// let state = initialize(&Config::default(), today);
/// assert_eq!(state.filter().selected_date(), today);
/// ```
#[must_use]
pub fn initialize(config: &Config, today: NaiveDate) -> AppState {
    tracing::debug!(%today, debounce_ms = config.debounce.as_millis(), "initializing taskhistory plugin");

    AppState::new(today, config.debounce, config.theme())
}
