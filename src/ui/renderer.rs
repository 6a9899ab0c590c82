//! Top-level rendering coordinator.
//!
//! Computes the view model from application state and hands it to the
//! component layout together with what the plugin shim owns: the header last
//! pushed through the navigator port, the calendar modal and the help toggle.
//!
//! Nothing is drawn before sign-in succeeds.

use crate::app::AppState;
use crate::ui::components::{self, Overlay};

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `overlay` - Header, calendar and help state held outside `AppState`
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// `true` if anything was drawn.
pub fn render(state: &AppState, overlay: &Overlay<'_>, rows: usize, cols: usize) -> bool {
    let Some(viewmodel) = state.compute_viewmodel(rows, cols) else {
        return false;
    };

    components::render_screen(&viewmodel, overlay, &state.theme, rows, cols);
    true
}
