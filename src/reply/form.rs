use std::time::{Duration, Instant};

use super::Tone;
use crate::ai::AiError;
use crate::ai::prompts::reply_prompt;
use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::constants::{COPY_FEEDBACK_SECS, VALIDATION_MESSAGE};

/// Email text and tone captured at submission time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub email_text: String,
    pub tone: Tone,
}

impl ReplyRequest {
    pub fn prompt(&self) -> String {
        reply_prompt(&self.email_text, self.tone.prompt_name())
    }
}

/// A submission that passed validation and is waiting for the AI
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub request_id: u64,
    pub request: ReplyRequest,
    pub prompt: String,
}

/// Why a reply could not be produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    /// Input rejected before any call was made
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    /// The AI service failed
    #[error("{0}")]
    Service(AiError),
}

impl ReplyError {
    /// Text shown inline under the form
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation => VALIDATION_MESSAGE.to_string(),
            Self::Service(err) => err.user_message(),
        }
    }
}

/// Lifecycle of the current submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReplyPhase {
    #[default]
    Idle,
    Submitting {
        request_id: u64,
    },
    Succeeded {
        reply: String,
    },
    Failed {
        error: AiError,
    },
}

/// Result of a finished submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Succeeded(String),
    Failed(ReplyError),
}

/// The reply composer: pending input plus the single live request/result slot.
///
/// Only one request is tracked at a time. Starting a new one clears the
/// previous result, error and copy feedback; completions for any other
/// request id are ignored.
#[derive(Debug, Clone, Default)]
pub struct ReplyForm {
    pub email_text: String,
    pub tone: Tone,
    phase: ReplyPhase,
    /// Set by a blank submission, cleared by the next submission
    invalid: bool,
    copied_at: Option<Instant>,
    last_request_id: u64,
}

impl ReplyForm {
    pub fn new(tone: Tone) -> Self {
        Self {
            tone,
            ..Default::default()
        }
    }

    /// Empty the form for a new session.
    ///
    /// The request counter survives so that a reply still in flight for the
    /// old session can never match a new request id.
    pub fn reset(&mut self, tone: Tone) {
        *self = Self {
            tone,
            last_request_id: self.last_request_id,
            ..Default::default()
        };
    }

    pub fn phase(&self) -> &ReplyPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ReplyPhase::Submitting { .. })
    }

    /// Submit is disabled while loading or while there is nothing to send
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.email_text.trim().is_empty()
    }

    pub fn reply(&self) -> Option<&str> {
        match &self.phase {
            ReplyPhase::Succeeded { reply } => Some(reply),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ReplyError> {
        if self.invalid {
            return Some(ReplyError::Validation);
        }
        match &self.phase {
            ReplyPhase::Failed { error } => Some(ReplyError::Service(error.clone())),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.user_message())
    }

    pub fn push_char(&mut self, c: char) {
        self.email_text.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.email_text.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.email_text.pop();
    }

    pub fn next_tone(&mut self) {
        self.tone = self.tone.next();
    }

    pub fn prev_tone(&mut self) {
        self.tone = self.tone.prev();
    }

    /// Validate the input and move to `Submitting`.
    ///
    /// Blank input returns to `Idle` with the validation error set and yields
    /// no request.
    pub fn begin_submit(&mut self) -> Result<PendingReply, ReplyError> {
        if self.email_text.trim().is_empty() {
            self.phase = ReplyPhase::Idle;
            self.invalid = true;
            self.copied_at = None;
            return Err(ReplyError::Validation);
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.invalid = false;
        self.copied_at = None;
        self.phase = ReplyPhase::Submitting { request_id };

        let request = ReplyRequest {
            email_text: self.email_text.clone(),
            tone: self.tone,
        };
        let prompt = request.prompt();
        Ok(PendingReply {
            request_id,
            request,
            prompt,
        })
    }

    /// Apply the AI result for `request_id`.
    ///
    /// Returns the new terminal state, or `None` when the result belongs to a
    /// request that is no longer in flight.
    pub fn complete(
        &mut self,
        request_id: u64,
        result: Result<String, AiError>,
    ) -> Option<ReplyOutcome> {
        match self.phase {
            ReplyPhase::Submitting { request_id: current } if current == request_id => {}
            _ => return None,
        }

        let outcome = match result {
            Ok(reply) => {
                self.phase = ReplyPhase::Succeeded {
                    reply: reply.clone(),
                };
                ReplyOutcome::Succeeded(reply)
            }
            Err(error) => {
                self.phase = ReplyPhase::Failed {
                    error: error.clone(),
                };
                ReplyOutcome::Failed(ReplyError::Service(error))
            }
        };
        Some(outcome)
    }

    /// Copy the displayed reply and (re)arm the copied badge.
    ///
    /// Returns `Ok(false)` when there is no reply to copy.
    pub fn copy_reply(
        &mut self,
        clipboard: &mut dyn ClipboardSink,
        now: Instant,
    ) -> Result<bool, ClipboardError> {
        let Some(reply) = self.reply() else {
            return Ok(false);
        };
        clipboard.write_text(reply)?;
        self.copied_at = Some(now);
        Ok(true)
    }

    pub fn is_copied(&self) -> bool {
        self.copied_at.is_some()
    }

    /// Hide the copied badge once its delay has passed. Returns true if it was hidden.
    pub fn expire_copied(&mut self, now: Instant) -> bool {
        match self.copied_at {
            Some(at)
                if now.saturating_duration_since(at) >= Duration::from_secs(COPY_FEEDBACK_SECS) =>
            {
                self.copied_at = None;
                true
            }
            _ => false,
        }
    }
}
