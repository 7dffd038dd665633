//! Main event loop and actor event processing

use anyhow::Result;
use crossterm::event;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use crate::ai::AiEvent;
use crate::constants::{BUSY_POLL_MS, IDLE_POLL_MS};
use crate::input::{InputResult, handle_input};
use crate::reply::ReplyOutcome;
use crate::session::SessionEvent;

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            if self.process_session_events() {
                self.dirty = true;
            }

            if self.process_ai_events() {
                self.dirty = true;
            }

            if self.state.clear_error_if_expired() {
                self.dirty = true;
            }

            if self.state.form.expire_copied(Instant::now()) {
                self.dirty = true;
            }

            // Keep the spinner moving
            if self.state.is_busy() {
                self.dirty = true;
            }

            // Render only when dirty (non-blocking - sends to render thread)
            if self.dirty {
                render_thread.render(self.state.clone());
                self.dirty = false;
            }

            let poll_timeout = if self.state.is_busy() {
                BUSY_POLL_MS
            } else {
                IDLE_POLL_MS
            };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                if let event::Event::Resize(width, height) = evt {
                    self.viewport = Rect::new(0, 0, width, height);
                }
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => self.handle_action(action).await?,
                    InputResult::Char(c) => self.state.form.push_char(c),
                    InputResult::Backspace => self.state.form.backspace(),
                    InputResult::Paste(text) => self.handle_paste(&text),
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    fn handle_paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.state.form.push_str(&text);
    }

    /// Drain the AI actor's events. Returns true if any were processed.
    pub(crate) fn process_ai_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.ai_actor.event_rx.try_recv() {
            had_events = true;
            self.apply_ai_event(event);
        }
        had_events
    }

    pub(crate) fn apply_ai_event(&mut self, event: AiEvent) {
        match event {
            AiEvent::ReplyDrafted { request_id, result } => {
                match self.state.form.complete(request_id, result) {
                    Some(ReplyOutcome::Succeeded(reply)) => {
                        self.state.reply_scroll = 0;
                        self.state.set_status("Reply ready");
                        #[cfg(feature = "notifications")]
                        crate::notification::notify_reply_ready(&self.config, &reply);
                        #[cfg(not(feature = "notifications"))]
                        let _ = reply;
                    }
                    Some(ReplyOutcome::Failed(error)) => {
                        tracing::debug!(request_id, "Reply failed: {}", error);
                        self.state.set_status("Reply failed");
                    }
                    None => tracing::debug!(request_id, "Dropping result for superseded request"),
                }
            }
        }
    }

    /// Drain the session actor's events. Returns true if any were processed.
    pub(crate) fn process_session_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.session_actor.event_rx.try_recv() {
            had_events = true;
            self.apply_session_event(event);
        }
        had_events
    }

    pub(crate) fn apply_session_event(&mut self, event: SessionEvent) {
        let result = match event {
            SessionEvent::SignedIn(profile) => Ok(profile),
            SessionEvent::SignInFailed(error) => Err(error),
        };

        if !self.state.session.complete_sign_in(result) {
            tracing::debug!("Ignoring sign-in result, no sign-in in progress");
            return;
        }

        if let Some(email) = self.state.session.user().map(|u| u.email.clone()) {
            tracing::info!("Signed in as {}", email);
            self.state.set_status(format!("Signed in as {}", email));
        }
    }
}
