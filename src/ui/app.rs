use ratatui::Frame;

use super::composer::render_composer;
use super::sign_in::render_sign_in;
use crate::app::state::AppState;
use crate::session::SessionState;

/// Draw the screen for the current session state
pub fn render(frame: &mut Frame, state: &AppState) {
    match &state.session {
        SessionState::SignedIn(user) => render_composer(frame, state, user),
        SessionState::SignedOut { .. } | SessionState::SigningIn => render_sign_in(frame, state),
    }
}
