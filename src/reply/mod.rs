//! Reply composer: tone selection, submission lifecycle and copy feedback

mod form;
mod tone;

pub use form::{PendingReply, ReplyError, ReplyForm, ReplyOutcome, ReplyPhase, ReplyRequest};
pub use tone::Tone;
