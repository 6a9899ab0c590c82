//! Search bar component renderer.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────┐ [margin]
/// [margin] │ / Search tasks by name   │ [margin]
/// [margin] └──────────────────────────┘ [margin]
/// ```
///
/// The border takes the `search_bar_border` color while the box is focused
/// and the plain `border` color otherwise. An empty query shows the dimmed
/// placeholder; a query still inside the debounce window ends with `…`.
///
/// # Parameters
///
/// * `row` - Top row of the box (1-indexed)
/// * `search` - Raw query, placeholder, focus and pending flags
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The row after the bottom border (row + 3)
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let (text, color) = if search.query.is_empty() {
        (search.placeholder.clone(), &theme.colors.text_dim)
    } else if search.pending {
        (format!("{}…", search.query), &theme.colors.text_normal)
    } else {
        (search.query.clone(), &theme.colors.text_normal)
    };
    let cursor = if search.focused { "▏" } else { "" };
    let text = truncate(&format!(" / {text}"), inner_width.saturating_sub(width(cursor)));
    let padding = inner_width.saturating_sub(width(&text) + width(cursor));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("{cursor}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
