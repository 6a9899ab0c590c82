//! History list renderer.
//!
//! Draws the list heading, one row per archived task with a title column and
//! a dimmed subtitle column, and the trailing pagination status.

use crate::ui::helpers::{self, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ListInfo};

/// Width of the title column including its right gutter.
const TITLE_COLUMN: usize = 46;

/// Renders the list starting at `row`.
///
/// The status line, if any, goes on `status_row` so it stays pinned above the
/// footer regardless of how many rows are visible.
///
/// # Parameters
///
/// * `row` - Row of the list heading (1-indexed); items follow directly
/// * `status_row` - Row of the pagination status line
/// * `list` - Heading, visible window of items and status text
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Layout
///
/// ```text
///  Archived tasks (20+) · member
///   Buy milk                                    Groceries
///   Water plants                                Sam
///                             ↓ more
/// ```
pub fn render_list(row: usize, status_row: usize, list: &ListInfo, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.accent_fg));
    print!("{}", truncate(&list.heading, cols));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for item in &list.items {
        current_row = render_row(current_row, item, theme, cols);
    }

    if let Some(status) = &list.status {
        position_cursor(status_row, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        helpers::print_centered(status, cols);
        print!("{}", Theme::reset());
    }
}

/// Renders one task row and returns the next free row.
///
/// The row is padded to the full width so the selection background spans the
/// whole line. Match highlighting is suppressed on the selected row.
fn render_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("  ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);

    let title_len = 2 + width(&item.title);
    let gutter = TITLE_COLUMN.saturating_sub(title_len).max(1);
    print!("{}", " ".repeat(gutter));

    let subtitle = truncate(&item.subtitle, cols.saturating_sub(title_len + gutter));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{subtitle}");

    let line_len = title_len + gutter + width(&subtitle);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
