use std::time::Instant;

use crate::constants::ERROR_TTL_SECS;
use crate::reply::ReplyForm;
use crate::session::SessionState;

/// Which composer control receives keystrokes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    EmailText,
    Tone,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::EmailText => Self::Tone,
            Self::Tone => Self::EmailText,
        }
    }

    pub fn prev(self) -> Self {
        // Two fields, so both directions coincide
        self.next()
    }
}

/// Status bar error and message state
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub error: Option<String>,
    pub error_time: Option<Instant>,
    pub message: String,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_time = None;
    }

    /// Clear error if TTL expired. Returns true if error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_error();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

/// Everything the render thread needs to draw a frame
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: SessionState,
    pub form: ReplyForm,
    pub focus: FormField,
    pub status: StatusState,
    /// First visible row of the suggested reply
    pub reply_scroll: u16,
}

impl AppState {
    /// A sign-in or a reply request is in flight
    pub fn is_busy(&self) -> bool {
        self.session.is_signing_in() || self.form.is_loading()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.user().is_some()
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn clear_error_if_expired(&mut self) -> bool {
        self.status.clear_error_if_expired()
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }
}
