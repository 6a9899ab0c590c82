//! Filter inputs of the history screen and the query key derived from them.
//!
//! [`FilterState`] holds three independent inputs:
//!
//! - **search text**, edited per keystroke and propagated through a
//!   [`DebounceGate`] into the *effective* search text;
//! - **grouping mode**, a discrete toggle applied immediately;
//! - **selected date**, applied immediately and only ever set through the
//!   date picker commit path (see [`super::ModalBridge`]).
//!
//! The [`QueryKey`] is built from the effective text, never from the raw text,
//! so typing inside the quiescence window cannot trigger a fetch.

use super::debounce::DebounceGate;
use crate::domain::{GroupingMode, QueryKey};
use chrono::NaiveDate;
use std::time::{Duration, Instant};

/// Default quiescence window for search text.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Filter inputs plus the debounced search text.
#[derive(Debug, Clone)]
pub struct FilterState {
    search_raw: String,
    search_effective: String,
    grouping: GroupingMode,
    selected_date: NaiveDate,
    gate: DebounceGate<String>,
}

impl FilterState {
    /// Creates the mount-time defaults: empty search, single-task grouping,
    /// `today` as the selected date.
    #[must_use]
    pub fn new(today: NaiveDate, debounce: Duration) -> Self {
        Self {
            search_raw: String::new(),
            search_effective: String::new(),
            grouping: GroupingMode::default(),
            selected_date: today,
            gate: DebounceGate::new(debounce),
        }
    }

    #[must_use]
    pub fn search_raw(&self) -> &str {
        &self.search_raw
    }

    #[must_use]
    pub fn search_effective(&self) -> &str {
        &self.search_effective
    }

    #[must_use]
    pub const fn grouping(&self) -> GroupingMode {
        self.grouping
    }

    #[must_use]
    pub const fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Updates the raw search text and (re)starts the debounce window.
    ///
    /// Returns the instant at which the value becomes due.
    pub fn set_search_text(&mut self, raw: impl Into<String>, now: Instant) -> Instant {
        self.search_raw = raw.into();
        tracing::trace!(query = %self.search_raw, "search text edited");
        self.gate.schedule(self.search_raw.clone(), now)
    }

    /// Appends one character to the raw search text.
    pub fn push_char(&mut self, c: char, now: Instant) -> Instant {
        let mut raw = self.search_raw.clone();
        raw.push(c);
        self.set_search_text(raw, now)
    }

    /// Removes the last character of the raw search text.
    ///
    /// Returns `None` without scheduling anything when the text is already empty.
    pub fn pop_char(&mut self, now: Instant) -> Option<Instant> {
        if self.search_raw.is_empty() {
            return None;
        }
        let mut raw = self.search_raw.clone();
        raw.pop();
        Some(self.set_search_text(raw, now))
    }

    /// Clears the raw search text (the effective text follows after the window).
    pub fn clear_search(&mut self, now: Instant) -> Option<Instant> {
        if self.search_raw.is_empty() && !self.gate.is_pending() {
            return None;
        }
        Some(self.set_search_text(String::new(), now))
    }

    /// Applies a due debounced value to the effective search text.
    ///
    /// Returns `true` when the effective text actually changed, i.e. when the
    /// query key changed.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        let Some(value) = self.gate.poll(now) else {
            return false;
        };
        if value == self.search_effective {
            tracing::trace!("debounced search text unchanged");
            return false;
        }
        tracing::debug!(query = %value, "search text settled");
        self.search_effective = value;
        true
    }

    /// Quiescence window of the search debounce.
    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        self.gate.window()
    }

    /// Time left until a pending search edit settles.
    #[must_use]
    pub fn debounce_remaining(&self, now: Instant) -> Option<Duration> {
        self.gate.remaining(now)
    }

    /// Drops any pending search edit without applying it.
    pub fn cancel_pending(&mut self) {
        if self.gate.cancel().is_some() {
            tracing::debug!("pending search edit discarded");
        }
    }

    /// Sets the grouping mode. Returns `true` if it changed.
    pub fn set_grouping_mode(&mut self, mode: GroupingMode) -> bool {
        if self.grouping == mode {
            return false;
        }
        self.grouping = mode;
        true
    }

    /// Sets the selected date. Returns `true` if it changed.
    ///
    /// Only the date picker commit path calls this.
    pub(crate) fn set_selected_date(&mut self, date: NaiveDate) -> bool {
        if self.selected_date == date {
            return false;
        }
        self.selected_date = date;
        true
    }

    /// Current fetch identity.
    #[must_use]
    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(self.search_effective.clone(), self.grouping, self.selected_date)
    }
}
