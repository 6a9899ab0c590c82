//! Header configuration kept in sync with the selected date.
//!
//! The screen header is owned by the navigation host, not by this plugin. The
//! binder remembers the `(navigation, date)` pair it last pushed and produces a
//! new [`HeaderConfig`] only when that pair changes. Search text is not an
//! input, so typing never touches the header.

use chrono::NaiveDate;
use std::fmt;

pub const HEADER_TITLE: &str = "History";
pub const HELP_TITLE: &str = "Task history";
pub const HELP_DESCRIPTION: &str = "Browse tasks archived on the selected day. \
    Switch between single tasks and groups, search by title, \
    and pick another day from the calendar.";

/// Identity of the navigation host the header belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationId(pub u32);

impl fmt::Display for NavigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nav#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpContent {
    pub title: String,
    pub description: String,
}

/// Header options pushed to the navigation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    pub title: String,
    pub selected_date: NaiveDate,
    /// Human-readable form of `selected_date`, e.g. `Fri 16 Oct 2026`.
    pub date_label: String,
    pub help: HelpContent,
}

impl HeaderConfig {
    #[must_use]
    pub fn for_date(selected_date: NaiveDate) -> Self {
        Self {
            title: HEADER_TITLE.to_string(),
            selected_date,
            date_label: selected_date.format("%a %-d %b %Y").to_string(),
            help: HelpContent {
                title: HELP_TITLE.to_string(),
                description: HELP_DESCRIPTION.to_string(),
            },
        }
    }
}

/// Tracks the last header dependency pair that was applied.
#[derive(Debug, Default)]
pub struct HeaderBinder {
    applied: Option<(NavigationId, NaiveDate)>,
}

impl HeaderBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a header update when `(navigation, date)` differs from the
    /// last applied pair; `None` otherwise.
    pub fn sync(&mut self, navigation: NavigationId, date: NaiveDate) -> Option<HeaderConfig> {
        let pair = (navigation, date);
        if self.applied == Some(pair) {
            return None;
        }
        tracing::debug!(%navigation, %date, "header dependencies changed");
        self.applied = Some(pair);
        Some(HeaderConfig::for_date(date))
    }

    /// Forgets the applied pair, so the next `sync` pushes again.
    pub fn reset(&mut self) {
        self.applied = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::filter::{FilterState, DEFAULT_DEBOUNCE};
    use std::time::{Duration, Instant};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).expect("date")
    }

    #[test]
    fn fires_once_per_distinct_date() {
        let nav = NavigationId(7);
        let mut binder = HeaderBinder::new();

        assert!(binder.sync(nav, day(16)).is_some());
        assert!(binder.sync(nav, day(16)).is_none());
        let update = binder.sync(nav, day(15)).expect("date changed");
        assert_eq!(update.selected_date, day(15));
        assert_eq!(update.date_label, "Thu 15 Oct 2026");
        assert!(binder.sync(nav, day(15)).is_none());
    }

    #[test]
    fn search_edits_never_fire() {
        let nav = NavigationId(1);
        let t0 = Instant::now();
        let mut filter = FilterState::new(day(16), DEFAULT_DEBOUNCE);
        let mut binder = HeaderBinder::new();
        let mut fired = usize::from(binder.sync(nav, filter.selected_date()).is_some());

        for (i, c) in "milk eggs".chars().enumerate() {
            let now = t0 + Duration::from_millis(100 * i as u64);
            filter.push_char(c, now);
            filter.poll_debounce(now);
            fired += usize::from(binder.sync(nav, filter.selected_date()).is_some());
        }
        filter.poll_debounce(t0 + Duration::from_secs(5));
        fired += usize::from(binder.sync(nav, filter.selected_date()).is_some());

        assert_eq!(fired, 1);
    }

    #[test]
    fn navigation_change_fires_again() {
        let mut binder = HeaderBinder::new();
        assert!(binder.sync(NavigationId(1), day(16)).is_some());
        assert!(binder.sync(NavigationId(2), day(16)).is_some());

        binder.reset();
        assert!(binder.sync(NavigationId(2), day(16)).is_some());
    }
}
