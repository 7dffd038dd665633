//! Request and response bodies for the Gemini `generateContent` endpoints

use serde::{Deserialize, Serialize};

use super::error::AiError;

#[derive(Serialize)]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single user turn with one text part
    pub(crate) fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

/// One response body, or one SSE chunk when streaming
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    /// Streams can carry an error object in place of candidates
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    pub(crate) fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let mut texts = parts.iter().filter_map(|p| p.text.as_deref()).peekable();
        texts.peek()?;
        Some(texts.collect())
    }

    pub(crate) fn take_error(&mut self) -> Option<AiError> {
        self.error.take().map(|e| e.into_error(None))
    }
}

/// Google API error envelope: `{"error": {"code": 429, "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_error(self, status: Option<u16>) -> AiError {
        let status = status.or(self.code).unwrap_or_default();
        match self.message {
            Some(message) if !message.trim().is_empty() => AiError::Api { status, message },
            _ => AiError::Unknown,
        }
    }
}

/// Map a non-success status and its body to an [`AiError`]
pub(crate) fn error_from_status(status: u16, body: &str) -> AiError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.into_error(Some(status));
    }
    let body = body.trim();
    if body.is_empty() {
        AiError::Unknown
    } else {
        AiError::Api {
            status,
            message: body.to_string(),
        }
    }
}
