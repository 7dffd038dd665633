//! Sign-in and sign-out action handlers

use crate::app::state::FormField;
use crate::session::{AuthError, SessionCommand};

use super::super::App;

impl App {
    /// Start a sign-in on the session actor
    pub(crate) async fn sign_in(&mut self) {
        if !self.state.session.begin_sign_in() {
            return;
        }
        self.dirty = true;
        tracing::info!("Signing in");

        if self
            .session_actor
            .cmd_tx
            .send(SessionCommand::SignIn)
            .await
            .is_err()
        {
            tracing::error!("Session actor is gone");
            self.state.session.complete_sign_in(Err(AuthError::Provider(
                "sign-in service stopped".to_string(),
            )));
        }
    }

    /// Drop the session and reset the composer
    pub(crate) fn sign_out(&mut self) {
        let Some(profile) = self.state.session.sign_out() else {
            return;
        };
        tracing::info!("Signed out {}", profile.email);

        self.state.form.reset(self.config.ui.default_tone);
        self.state.focus = FormField::default();
        self.state.reply_scroll = 0;
        self.state.status.clear_error();
        self.state.set_status("Signed out");
    }
}
