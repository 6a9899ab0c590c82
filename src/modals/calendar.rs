//! Month-view date picker.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Keys understood by the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarKey {
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    PrevMonth,
    NextMonth,
    Commit,
    Cancel,
}

/// Result of feeding one key to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarOutcome {
    /// The cursor moved; redraw.
    Moved,
    /// The key had no effect (e.g. moving past the last selectable day).
    Unchanged,
    Committed(NaiveDate),
    Dismissed,
}

/// Cursor over calendar days, never after `max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarModal {
    cursor: NaiveDate,
    max: NaiveDate,
}

impl CalendarModal {
    #[must_use]
    pub fn new(current: NaiveDate, max: NaiveDate) -> Self {
        Self {
            cursor: current.min(max),
            max,
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    #[must_use]
    pub const fn max(&self) -> NaiveDate {
        self.max
    }

    pub fn handle_key(&mut self, key: CalendarKey) -> CalendarOutcome {
        let target = match key {
            CalendarKey::Commit => return CalendarOutcome::Committed(self.cursor),
            CalendarKey::Cancel => return CalendarOutcome::Dismissed,
            CalendarKey::PrevDay => self.cursor.checked_sub_days(Days::new(1)),
            CalendarKey::NextDay => self.cursor.checked_add_days(Days::new(1)),
            CalendarKey::PrevWeek => self.cursor.checked_sub_days(Days::new(7)),
            CalendarKey::NextWeek => self.cursor.checked_add_days(Days::new(7)),
            CalendarKey::PrevMonth => self.cursor.checked_sub_months(Months::new(1)),
            CalendarKey::NextMonth => self.cursor.checked_add_months(Months::new(1)),
        };

        let Some(target) = target.map(|date| date.min(self.max)) else {
            return CalendarOutcome::Unchanged;
        };
        if target == self.cursor {
            return CalendarOutcome::Unchanged;
        }
        self.cursor = target;
        CalendarOutcome::Moved
    }

    /// Heading of the month under the cursor, e.g. `October 2026`.
    #[must_use]
    pub fn title(&self) -> String {
        self.cursor.format("%B %Y").to_string()
    }

    /// Weeks of the cursor's month, Monday first; days outside the month are `None`.
    #[must_use]
    pub fn month_grid(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let Some(first) = self.cursor.with_day(1) else {
            return vec![];
        };
        let month = first.month();
        let lead = first.weekday().num_days_from_monday() as usize;

        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut slot = lead;
        let mut day = Some(first);

        while let Some(date) = day.filter(|d| d.month() == month) {
            week[slot] = Some(date);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
            day = date.succ_opt();
        }
        if slot > 0 {
            weeks.push(week);
        }
        weeks
    }

    /// Whether `date` may be picked.
    #[must_use]
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        date <= self.max
    }
}

/// Two-letter weekday labels in grid order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).expect("date")
    }

    #[test]
    fn moves_by_day_and_week() {
        let mut calendar = CalendarModal::new(day(10, 14), day(10, 16));
        assert_eq!(calendar.handle_key(CalendarKey::PrevWeek), CalendarOutcome::Moved);
        assert_eq!(calendar.cursor(), day(10, 7));
        assert_eq!(calendar.handle_key(CalendarKey::NextDay), CalendarOutcome::Moved);
        assert_eq!(calendar.cursor(), day(10, 8));
    }

    #[test]
    fn never_moves_past_max() {
        let mut calendar = CalendarModal::new(day(10, 14), day(10, 16));
        assert_eq!(calendar.handle_key(CalendarKey::NextWeek), CalendarOutcome::Moved);
        assert_eq!(calendar.cursor(), day(10, 16));
        assert_eq!(calendar.handle_key(CalendarKey::NextDay), CalendarOutcome::Unchanged);
        assert_eq!(calendar.handle_key(CalendarKey::NextMonth), CalendarOutcome::Unchanged);
    }

    #[test]
    fn month_steps_clamp_day() {
        let mut calendar = CalendarModal::new(day(3, 31), day(10, 16));
        calendar.handle_key(CalendarKey::PrevMonth);
        assert_eq!(calendar.cursor(), day(2, 28));
    }

    #[test]
    fn commit_and_cancel_report_outcome() {
        let mut calendar = CalendarModal::new(day(10, 1), day(10, 16));
        assert_eq!(calendar.handle_key(CalendarKey::Commit), CalendarOutcome::Committed(day(10, 1)));
        assert_eq!(calendar.handle_key(CalendarKey::Cancel), CalendarOutcome::Dismissed);
    }

    #[test]
    fn grid_starts_on_monday() {
        // 1 October 2026 is a Thursday
        let calendar = CalendarModal::new(day(10, 16), day(10, 16));
        let grid = calendar.month_grid();

        assert_eq!(grid.len(), 5);
        assert!(grid[0][..3].iter().all(Option::is_none));
        assert_eq!(grid[0][3], Some(day(10, 1)));
        assert_eq!(grid[4][5], Some(day(10, 31)));
        assert_eq!(calendar.title(), "October 2026");
        assert!(!calendar.is_selectable(day(10, 17)));
    }
}
