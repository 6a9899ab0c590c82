//! In-plugin modal host.
//!
//! [`ModalStack`] implements [`ModalHost`] by keeping the presented modals
//! inside the plugin and drawing them over the list. Keys are routed to the
//! top modal while one is open; its outcome is reported back to the handler as
//! an event by the plugin shim.
//!
//! - [`calendar`]: month-view date picker

pub mod calendar;

pub use calendar::{CalendarKey, CalendarModal, CalendarOutcome, WEEKDAY_LABELS};

use crate::history::{ModalKind, ModalRequest};
use crate::ports::ModalHost;

/// A presented modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveModal {
    Calendar(CalendarModal),
}

impl ActiveModal {
    #[must_use]
    pub const fn kind(&self) -> ModalKind {
        match self {
            Self::Calendar(_) => ModalKind::Calendar,
        }
    }
}

/// Modals currently shown, topmost last.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<ActiveModal>,
}

impl ModalStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    #[must_use]
    pub fn top(&self) -> Option<&ActiveModal> {
        self.stack.last()
    }

    /// The calendar, if it is the top modal.
    #[must_use]
    pub fn calendar(&self) -> Option<&CalendarModal> {
        match self.stack.last()? {
            ActiveModal::Calendar(calendar) => Some(calendar),
        }
    }

    /// Feeds a key to the calendar on top.
    ///
    /// A commit or a cancel closes the calendar right away, so it is never
    /// left on screen even if the handler ignores the outcome. Returns `None`
    /// when no calendar is on top.
    pub fn handle_calendar_key(&mut self, key: CalendarKey) -> Option<CalendarOutcome> {
        let ActiveModal::Calendar(calendar) = self.stack.last_mut()?;
        let outcome = calendar.handle_key(key);
        if matches!(outcome, CalendarOutcome::Committed(_) | CalendarOutcome::Dismissed) {
            self.stack.pop();
        }
        Some(outcome)
    }
}

impl ModalHost for ModalStack {
    fn present(&mut self, request: ModalRequest) {
        let kind = request.kind();
        self.stack.retain(|modal| modal.kind() != kind);
        let modal = match request {
            ModalRequest::Calendar { current, max } => ActiveModal::Calendar(CalendarModal::new(current, max)),
        };
        tracing::debug!(?kind, "modal presented");
        self.stack.push(modal);
    }

    fn dismiss(&mut self, kind: ModalKind) {
        let before = self.stack.len();
        self.stack.retain(|modal| modal.kind() != kind);
        if self.stack.len() != before {
            tracing::debug!(?kind, "modal dismissed");
        }
    }
}
