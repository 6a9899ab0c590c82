//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at an absolute row and
//! returns the next free row where that is useful to the caller.
//!
//! # Components
//!
//! - [`header`]: Title and selected date
//! - [`toggle`]: Task / Group selector
//! - [`search`]: Search input box
//! - [`table`]: History list rows
//! - [`empty`]: Spinner, empty and error bodies
//! - [`help`]: Help panel
//! - [`calendar`]: Date picker overlay
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Toggle]
//! [Search Bar - 3 lines]
//! [Body: list heading + rows | spinner | empty | error | help]
//! [List status]
//! [Border]
//! [Footer]
//! ```

mod calendar;
mod empty;
mod footer;
mod header;
mod help;
mod search;
mod table;
mod toggle;

use crate::history::HeaderConfig;
use crate::modals::CalendarModal;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use calendar::render_calendar;
use empty::{render_empty_state, render_error, render_spinner};
use footer::render_footer;
use header::render_header;
use help::render_help;
use search::render_search_bar;
use table::render_list;
use toggle::render_toggle;

/// Rows between the top of the body and its centered placeholder messages.
const PLACEHOLDER_OFFSET: usize = 3;

/// Everything drawn around the view model.
pub struct Overlay<'a> {
    pub header: Option<&'a HeaderConfig>,
    pub calendar: Option<&'a CalendarModal>,
    pub show_help: bool,
}

/// Renders a horizontal border line at `row` and returns `row + 1`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for `vm`.
pub fn render_screen(vm: &UIViewModel, overlay: &Overlay<'_>, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 1;

    current_row = render_header(current_row, overlay.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_toggle(current_row, &vm.toggle, theme);
    let body_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    match (&vm.body, overlay.header) {
        (_, Some(header)) if overlay.show_help => render_help(body_row, border_row, &header.help, theme, cols),
        (BodyView::Idle, _) => {}
        (BodyView::Spinner, _) => render_spinner(body_row + PLACEHOLDER_OFFSET, theme, cols),
        (BodyView::Empty(empty), _) => render_empty_state(body_row + PLACEHOLDER_OFFSET, empty, theme, cols),
        (BodyView::Error(error), _) => render_error(body_row + PLACEHOLDER_OFFSET, error, theme, cols),
        (BodyView::List(list), _) => render_list(body_row, status_row, list, theme, cols),
    }

    if let Some(calendar) = overlay.calendar {
        render_calendar(body_row, calendar, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
