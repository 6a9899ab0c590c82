//! Shared rendering utilities and helpers.
//!
//! Low-level helpers used across several components: cursor placement,
//! width-aware truncation, and fuzzy-match highlighting with proper ANSI
//! escape sequence management.
//!
//! All widths and ranges are in characters, not bytes, so task titles with
//! non-ASCII text neither panic on slicing nor misalign columns.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Positions the cursor at a specific row and column (1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates `text` to at most `max` characters, marking the cut with `…`.
///
/// # Example
///
/// ```rust
/// use taskhistory::ui::helpers::truncate;
///
/// assert_eq!(truncate("Buy milk", 20), "Buy milk");
/// assert_eq!(truncate("Buy milk and eggs", 8), "Buy mil…");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Number of characters in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Computes character ranges of `text` matched by `query`.
///
/// Runs the Skim fuzzy matcher and coalesces consecutive match indices into
/// `(start, end)` ranges with an exclusive end. Returns an empty vector for an
/// empty query or no match.
///
/// # Example
///
/// ```rust
/// use taskhistory::ui::helpers::highlight_ranges;
///
/// assert_eq!(highlight_ranges("buy milk", "milk"), vec![(4, 8)]);
/// assert!(highlight_ranges("buy milk", "").is_empty());
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.trim().is_empty() {
        return vec![];
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query.trim()) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// When `is_selected` is `true`, match highlighting is skipped so it does not
/// fight the selection background.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start.max(current_pos)..end.max(current_pos)].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end.max(current_pos);
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Prints `text` centered in a full-width line.
pub fn print_centered(text: &str, cols: usize) {
    let len = width(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;
    print!("{}", " ".repeat(padding));
    print!("{}", truncate(text, cols));
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

/// Greedy word wrap to lines of at most `max` characters.
///
/// Words longer than `max` are truncated rather than split.
#[must_use]
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let word = truncate(word, max);
        if !line.is_empty() && width(&line) + 1 + width(&word) > max {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Überprüfung", 5), "Über…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(width("Über"), 4);
    }

    #[test]
    fn highlight_merges_adjacent_indices() {
        let ranges = highlight_ranges("Water plants", "wat");
        assert_eq!(ranges, vec![(0, 3)]);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("pick another day", 10), vec!["pick", "another", "day"]);
        assert_eq!(wrap("a b c", 20), vec!["a b c"]);
        assert!(wrap("   ", 5).is_empty());
    }

    #[test]
    fn highlight_without_match_is_empty() {
        assert!(highlight_ranges("Water plants", "zzz").is_empty());
    }
}
