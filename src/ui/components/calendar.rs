//! Calendar overlay renderer.

use crate::modals::{CalendarModal, WEEKDAY_LABELS};
use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use chrono::Datelike;

/// Inner width: seven 3-character day cells plus padding.
const GRID_WIDTH: usize = 23;

/// Draws the date picker as a box centered horizontally from `row`.
///
/// The cursor day uses the selection colors and days after the maximum are
/// dimmed.
///
/// # Layout
///
/// ```text
/// ┌───────────────────────┐
/// │     October 2026      │
/// │ Mo Tu We Th Fr Sa Su  │
/// │           1  2  3  4  │
/// │  ...                  │
/// │ Enter pick  Esc close │
/// └───────────────────────┘
/// ```
pub fn render_calendar(row: usize, calendar: &CalendarModal, theme: &Theme, cols: usize) {
    let left = cols.saturating_sub(GRID_WIDTH + 2) / 2 + 1;
    let border = Theme::fg(&theme.colors.search_bar_border);
    let mut current = row;

    position_cursor(current, left);
    print!("{border}┌{}┐{}", "─".repeat(GRID_WIDTH), Theme::reset());
    current += 1;

    let framed = |current: usize, body: &dyn Fn()| {
        position_cursor(current, left);
        print!("{border}│{}", Theme::reset());
        body();
        position_cursor(current, left + GRID_WIDTH + 1);
        print!("{border}│{}", Theme::reset());
    };

    framed(current, &|| {
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
        print_centered(&calendar.title(), GRID_WIDTH);
        print!("{}", Theme::reset());
    });
    current += 1;

    framed(current, &|| {
        print!("{} {}  {}", Theme::fg(&theme.colors.text_dim), WEEKDAY_LABELS.join(" "), Theme::reset());
    });
    current += 1;

    for week in calendar.month_grid() {
        framed(current, &|| {
            print!(" ");
            for slot in week {
                match slot {
                    Some(date) if date == calendar.cursor() => {
                        print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
                        print!("{:>2}", date.day());
                        print!("{} ", Theme::reset());
                    }
                    Some(date) if !calendar.is_selectable(date) => {
                        print!("{}{}{:>2}{} ", Theme::dim(), Theme::fg(&theme.colors.text_dim), date.day(), Theme::reset());
                    }
                    Some(date) => {
                        print!("{}{:>2}{} ", Theme::fg(&theme.colors.text_normal), date.day(), Theme::reset());
                    }
                    None => print!("   "),
                }
            }
            print!(" ");
        });
        current += 1;
    }

    framed(current, &|| {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print_centered("Enter pick  Esc close", GRID_WIDTH);
        print!("{}", Theme::reset());
    });
    current += 1;

    position_cursor(current, left);
    print!("{border}└{}┘{}", "─".repeat(GRID_WIDTH), Theme::reset());
}
