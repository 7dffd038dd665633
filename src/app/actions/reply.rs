//! Reply composer action handlers

use std::time::Instant;

use crate::ai::{AiCommand, AiError};
use crate::constants::REPLY_SCROLL_ROWS;

use super::super::App;

impl App {
    /// Validate the form and hand the prompt to the AI actor
    pub(crate) async fn generate(&mut self) {
        let pending = match self.state.form.begin_submit() {
            Ok(pending) => pending,
            Err(e) => {
                tracing::debug!("Submit rejected: {}", e);
                return;
            }
        };
        self.dirty = true;
        self.state.reply_scroll = 0;
        self.state.set_status("Generating reply...");
        tracing::debug!(
            request_id = pending.request_id,
            tone = %pending.request.tone,
            email_len = pending.request.email_text.len(),
            "Submitting reply request"
        );

        let command = AiCommand::DraftReply {
            request_id: pending.request_id,
            prompt: pending.prompt,
        };
        if self.ai_actor.cmd_tx.send(command).await.is_err() {
            tracing::error!("AI actor is gone");
            self.state.form.complete(
                pending.request_id,
                Err(AiError::Transport("AI worker stopped".to_string())),
            );
        }
    }

    /// Move the suggested reply one step, staying within the wrapped text
    pub(crate) fn scroll_reply(&mut self, down: bool) {
        let limit = crate::ui::reply_scroll_limit(&self.state, self.viewport);
        let current = self.state.reply_scroll.min(limit);
        self.state.reply_scroll = if down {
            current.saturating_add(REPLY_SCROLL_ROWS).min(limit)
        } else {
            current.saturating_sub(REPLY_SCROLL_ROWS)
        };
    }

    /// Copy the displayed reply to the clipboard
    pub(crate) fn copy_reply(&mut self) {
        match self
            .state
            .form
            .copy_reply(&mut *self.clipboard, Instant::now())
        {
            Ok(true) => self.state.set_status("Copied reply to clipboard"),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                self.state.set_error(e);
            }
        }
    }
}
