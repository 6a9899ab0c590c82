//! Placeholder bodies: spinner, empty result and fetch error.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, ErrorInfo};

/// Renders the empty-result message and its hint, centered, from `row`.
///
/// # Parameters
///
/// * `row` - Row of the message; the hint goes on the row below
/// * `empty` - Message and hint text
/// * `theme` - Active color theme (`empty_state_fg` for the message)
/// * `cols` - Terminal width in columns
///
/// # Example
///
/// ```text
///                     Nothing archived on this day
///                     Press 'c' to pick another day
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(&empty.message, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&empty.subtitle, cols);
    print!("{}", Theme::reset());
}

/// Renders a fetch failure in place of the list.
pub fn render_error(row: usize, error: &ErrorInfo, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print_centered(&error.message, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&error.hint, cols);
    print!("{}", Theme::reset());
}

/// Renders the loading line shown while the first page of a query is
/// outstanding.
pub fn render_spinner(row: usize, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.accent_fg));
    print_centered("⠋ Loading archived tasks…", cols);
    print!("{}", Theme::reset());
}
