//! Input mode state types for the application.
//!
//! These types decide which keybindings are active and how key presses are
//! interpreted by the plugin shim.
//!
//! # State Machine
//!
//! The application operates in one of two input modes:
//! - **Normal**: list navigation and commands
//! - **Search**: the search box is focused, either for typing or while the
//!   user walks the filtered results
//!
//! The calendar modal sits on top of both modes and captures keys while open;
//! that state lives in the modal host, not here.
//!
//! # Example
//!
//! ```rust
//! use taskhistory::app::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_typing());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through the results of the current search.
    ///
    /// Accepts j/k for movement, enter to open, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), / (search), Tab (grouping),
    /// c (calendar), enter (open), e (edit), u (reuse), q (quit).
    #[default]
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),
}

impl InputMode {
    /// Whether key presses should be treated as search text.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }

    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }
}
