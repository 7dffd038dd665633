//! Failures talking to the generative-language service

/// Why a generation request failed.
///
/// The `Display` impl yields the bare cause; use [`AiError::user_message`]
/// for the sentence shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    /// Connection, TLS or body-read failure
    #[error("{0}")]
    Transport(String),
    /// Non-success HTTP status from the API
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Body was not the JSON we expected
    #[error("malformed response: {0}")]
    Malformed(String),
    /// Request succeeded but no candidate carried text
    #[error("the model returned no text")]
    EmptyResponse,
    /// Failure with no usable description
    #[error("unknown error")]
    Unknown,
}

impl AiError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Cause text, if the failure carries one
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Unknown => None,
            other => Some(other.to_string()),
        }
    }

    /// Sentence shown to the user when a non-streamed request fails
    pub fn user_message(&self) -> String {
        match self.message() {
            Some(message) => {
                format!("An error occurred while communicating with the AI: {message}")
            }
            None => "An unknown error occurred while communicating with the AI.".to_string(),
        }
    }

    /// Trailing annotation appended to a streamed reply that failed
    pub fn stream_annotation(&self) -> String {
        match self.message() {
            Some(message) => format!("\n\n**Error:** {message}"),
            None => "\n\n**An unknown error occurred.**".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_with_cause() {
        let err = AiError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "An error occurred while communicating with the AI: quota exceeded"
        );
    }

    #[test]
    fn test_user_message_unknown() {
        assert_eq!(
            AiError::Unknown.user_message(),
            "An unknown error occurred while communicating with the AI."
        );
    }

    #[test]
    fn test_stream_annotation() {
        assert_eq!(
            AiError::Transport("connection reset".to_string()).stream_annotation(),
            "\n\n**Error:** connection reset"
        );
        assert_eq!(
            AiError::Unknown.stream_annotation(),
            "\n\n**An unknown error occurred.**"
        );
    }
}
