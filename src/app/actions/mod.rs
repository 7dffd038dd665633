//! Action handlers for user input
//!
//! - `session`: sign-in and sign-out
//! - `reply`: generating and copying replies

mod reply;
mod session;

use anyhow::Result;

use crate::input::Action;

use super::App;

impl App {
    pub(crate) async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SignIn => self.sign_in().await,
            Action::SignOut => self.sign_out(),
            Action::Quit => {} // Handled in event loop

            Action::NextField => self.state.focus = self.state.focus.next(),
            Action::PrevField => self.state.focus = self.state.focus.prev(),
            Action::NextTone => self.state.form.next_tone(),
            Action::PrevTone => self.state.form.prev_tone(),

            Action::Generate => self.generate().await,
            Action::Copy => self.copy_reply(),
            Action::ScrollReplyUp => self.scroll_reply(false),
            Action::ScrollReplyDown => self.scroll_reply(true),
        }
        Ok(())
    }
}
