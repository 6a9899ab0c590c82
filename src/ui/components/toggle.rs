//! Grouping toggle renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToggleInfo;

/// Renders the two grouping options side by side, the active one in the
/// selection colors.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///    Task   Group
///   ^^^^^^ active option drawn with selection_fg on selection_bg
/// ```
pub fn render_toggle(row: usize, toggle: &ToggleInfo, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("  ");
    for (label, active) in &toggle.options {
        if *active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!(" {label} ");
        print!("{}", Theme::reset());
        print!(" ");
    }
    row + 1
}
