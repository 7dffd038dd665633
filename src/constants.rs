//! Application-wide constants for tuning and configuration
//!
//! Centralizes magic numbers to make them discoverable and configurable.

/// How long the "Copied!" badge stays visible after a copy, in seconds.
pub const COPY_FEEDBACK_SECS: u64 = 2;

/// Simulated identity-provider round trip in milliseconds.
pub const DEFAULT_SIGN_IN_DELAY_MS: u64 = 1500;

/// Gemini model used when the config does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Generative Language API (v1beta).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the Gemini API key.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Connect timeout for the outbound AI call. There is no overall request timeout.
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shown when the user submits without pasting an email.
pub const VALIDATION_MESSAGE: &str = "Please paste the email content before generating a reply.";

/// Status bar error display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 5;

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

/// Event poll timeout while a request or sign-in is in flight (ms).
pub const BUSY_POLL_MS: u64 = 50;

/// Event poll timeout when idle (ms).
pub const IDLE_POLL_MS: u64 = 150;

/// Rows the reply pane moves per PageUp/PageDown.
pub const REPLY_SCROLL_ROWS: u16 = 5;

/// Maximum characters of a reply shown in a desktop notification.
pub const NOTIFICATION_PREVIEW_CHARS: usize = 100;
