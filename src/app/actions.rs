//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type: descriptions of effects produced
//! by the event handler after processing user input or collaborator results.
//! The handler itself never performs I/O; every request to the outside world
//! leaves it as an `Action` and is carried out through the ports in
//! [`crate::ports`].
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several effects can be queued atomically. The runtime executes them in
//! order via [`crate::ports::execute`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use taskhistory::app::Action;
//!
//! let actions = vec![Action::RequestAuth, Action::ArmTimer(Duration::from_millis(500))];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::Route;
use crate::history::{HeaderConfig, ModalKind, ModalRequest, PageRequest};
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Asks the auth collaborator for the current session status.
    ///
    /// The answer comes back as `Event::AuthResolved`.
    RequestAuth,

    /// Fetches one page of archived tasks.
    ///
    /// The result comes back as `Event::PageLoaded` carrying the same ticket.
    FetchPage(PageRequest),

    /// Wakes the handler with `Event::Tick` after the given delay.
    ///
    /// Used to settle debounced search text. Timers cannot be cancelled, so a
    /// superseded wake-up simply finds nothing due.
    ArmTimer(Duration),

    /// Pushes new options to the externally owned screen header.
    SetHeader(HeaderConfig),

    /// Presents a modal through the modal host.
    PresentModal(ModalRequest),

    /// Dismisses a modal of the given kind, if the host still shows one.
    DismissModal(ModalKind),

    /// Navigates to another screen.
    Navigate(Route),

    /// Re-creates an archived task as a new active task.
    ///
    /// Success comes back as `Event::TaskReused`.
    ReuseTask {
        /// Identifier of the archived task to reuse.
        task_id: String,
    },

    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly asks to leave (e.g. pressing 'q').
    CloseFocus,
}
