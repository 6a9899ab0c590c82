//! Help panel drawn in place of the list while `?` is toggled on.

use crate::history::HelpContent;
use crate::ui::helpers::{position_cursor, wrap};
use crate::ui::theme::Theme;

/// Renders the help title and the wrapped description from `row`, stopping
/// before `last_row`.
pub fn render_help(row: usize, last_row: usize, help: &HelpContent, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("  {}", help.title);
    print!("{}", Theme::reset());

    let lines = wrap(&help.description, cols.saturating_sub(4).max(1));
    for (offset, line) in lines.iter().enumerate() {
        let current = row + 2 + offset;
        if current >= last_row {
            break;
        }
        position_cursor(current, 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  {line}");
        print!("{}", Theme::reset());
    }
}
