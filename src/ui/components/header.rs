//! Header component renderer.
//!
//! Draws the header options last pushed through the navigator port: the
//! title on the left and the selected date on the right.

use crate::history::header::HEADER_TITLE;
use crate::history::HeaderConfig;
use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;

/// Renders the header bar at `row` and returns the next free row.
///
/// Before the first header sync only the default title is shown.
///
/// # Parameters
///
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Header options last pushed to the navigator, if any
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///  History                                             Fri 16 Oct 2026 
/// ```
pub fn render_header(row: usize, header: Option<&HeaderConfig>, theme: &Theme, cols: usize) -> usize {
    let title = header.map_or(HEADER_TITLE, |h| h.title.as_str());
    let date = header.map_or("", |h| h.date_label.as_str());

    let title = truncate(title, cols.saturating_sub(width(date) + 3));
    let used = 1 + width(&title) + width(date) + 1;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!(" {title}");
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::fg(&theme.colors.accent_fg));
    print!("{date} ");

    print!("{}", Theme::reset());
    row + 1
}
