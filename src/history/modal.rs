//! Date picker presentation and commit routing.

use super::filter::FilterState;
use chrono::NaiveDate;

/// Modal kinds the history screen can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    Calendar,
}

/// Presentation request handed to the modal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalRequest {
    Calendar {
        current: NaiveDate,
        /// Latest selectable date; the picker never offers days after it.
        max: NaiveDate,
    },
}

impl ModalRequest {
    #[must_use]
    pub const fn kind(&self) -> ModalKind {
        match self {
            Self::Calendar { .. } => ModalKind::Calendar,
        }
    }
}

/// Bridges the externally presented date picker to [`FilterState`].
///
/// The committed date is the only path by which the selected date changes.
#[derive(Debug, Default)]
pub struct ModalBridge {
    open: Option<NaiveDate>,
}

impl ModalBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Returns a presentation request, or `None` if the picker is already open.
    pub fn open_date_picker(&mut self, current: NaiveDate, max: NaiveDate) -> Option<ModalRequest> {
        if self.open.is_some() {
            tracing::debug!("date picker already open");
            return None;
        }
        self.open = Some(max);
        Some(ModalRequest::Calendar {
            current: current.min(max),
            max,
        })
    }

    /// Routes a committed date into `filter` and closes the picker.
    ///
    /// Dates after the bound given at open time are clamped to it. Returns
    /// `true` when the selected date changed; commits arriving while the
    /// picker is closed are ignored.
    pub fn commit(&mut self, date: NaiveDate, filter: &mut FilterState) -> bool {
        let Some(max) = self.open.take() else {
            tracing::debug!(%date, "ignoring commit with no open picker");
            return false;
        };
        let date = date.min(max);
        tracing::debug!(%date, "date picker committed");
        filter.set_selected_date(date)
    }

    /// Closes the picker without touching the filter.
    ///
    /// Returns `false` if nothing was open.
    pub fn dismiss(&mut self) -> bool {
        self.open.take().is_some()
    }
}
