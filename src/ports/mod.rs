//! Capability traits for the collaborators around the history screen.
//!
//! The application layer never talks to Zellij, the network or the clock. It
//! emits [`Action`]s, and [`execute`] routes each one to the port that owns
//! the concern. The plugin shim implements every port with host calls; tests
//! implement them with recorders.
//!
//! # Ports
//!
//! | Port | Owns | Answers with |
//! |------|------|--------------|
//! | [`AuthCollaborator`] | session status | `Event::AuthResolved` |
//! | [`DataFetcher`] | page requests | `Event::PageLoaded` |
//! | [`Navigator`] | header options, navigation, pane focus | nothing |
//! | [`ModalHost`] | modal presentation | `Event::CalendarCommitted` / `CalendarDismissed` |
//! | [`Scheduler`] | wake-ups | `Event::Tick` |
//! | [`TaskCommands`] | task mutations | `Event::TaskReused` |

use crate::app::Action;
use crate::domain::Route;
use crate::history::{HeaderConfig, ModalKind, ModalRequest, PageRequest};
use std::time::Duration;

pub trait AuthCollaborator {
    /// Starts resolving the current auth status.
    fn resolve_auth(&mut self);
}

pub trait DataFetcher {
    /// Starts fetching one page. The response must echo `request.ticket`.
    fn fetch_page(&mut self, request: &PageRequest);
}

pub trait Navigator {
    /// Replaces the header options of the hosting screen.
    fn set_options(&mut self, header: &HeaderConfig);

    fn navigate(&mut self, route: &Route);

    /// Hides the screen.
    fn close(&mut self);
}

pub trait ModalHost {
    fn present(&mut self, request: ModalRequest);

    /// Removes a modal of `kind`; a no-op if none is shown.
    fn dismiss(&mut self, kind: ModalKind);
}

pub trait Scheduler {
    /// Wakes the handler with a tick no earlier than `after` from now.
    fn arm(&mut self, after: Duration);
}

pub trait TaskCommands {
    fn reuse(&mut self, task_id: &str);
}

/// Everything [`execute`] needs.
pub trait Host: AuthCollaborator + DataFetcher + Navigator + ModalHost + Scheduler + TaskCommands {}

impl<T> Host for T where T: AuthCollaborator + DataFetcher + Navigator + ModalHost + Scheduler + TaskCommands {}

/// Carries out one action through the matching port.
pub fn execute<H: Host + ?Sized>(action: &Action, host: &mut H) {
    tracing::trace!(?action, "executing action");
    match action {
        Action::RequestAuth => host.resolve_auth(),
        Action::FetchPage(request) => host.fetch_page(request),
        Action::ArmTimer(after) => host.arm(*after),
        Action::SetHeader(header) => host.set_options(header),
        Action::PresentModal(request) => host.present(request.clone()),
        Action::DismissModal(kind) => host.dismiss(*kind),
        Action::Navigate(route) => host.navigate(route),
        Action::ReuseTask { task_id } => host.reuse(task_id),
        Action::CloseFocus => host.close(),
    }
}

/// Carries out actions in order.
pub fn execute_all<H: Host + ?Sized>(actions: &[Action], host: &mut H) {
    for action in actions {
        execute(action, host);
    }
}
