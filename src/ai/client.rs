//! Gemini API client

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Client;

use super::error::AiError;
use super::sse::SseDecoder;
use super::wire::{GenerateContentRequest, GenerateContentResponse, error_from_status};
use crate::config::AiConfig;
use crate::constants::HTTP_CONNECT_TIMEOUT_SECS;

/// One piece of a streamed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFragment {
    Text(String),
    /// Terminal fragment; nothing follows it
    Error(AiError),
}

impl StreamFragment {
    /// Text to append to the output, with failures rendered as an annotation
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Error(err) => err.stream_annotation(),
        }
    }
}

impl fmt::Display for StreamFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Error(err) => f.write_str(&err.stream_annotation()),
        }
    }
}

/// Anything that turns a prompt into generated text.
///
/// Implementations never panic on service failures: `generate` reports them
/// as `Err`, `generate_stream` as a final [`StreamFragment::Error`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;

    /// Lazily polled, single-use, finite stream of fragments
    fn generate_stream(&self, prompt: &str) -> BoxStream<'static, StreamFragment>;
}

/// Client for the Generative Language `generateContent` API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: String, config: &AiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, method)
    }

    /// Send the request and check the status; the body is left unread
    async fn post(&self, url: String, prompt: &str) -> Result<reqwest::Response, AiError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(AiError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_status(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn request_text(&self, prompt: &str) -> Result<String, AiError> {
        let response = self.post(self.endpoint("generateContent"), prompt).await?;
        let mut body: GenerateContentResponse =
            response.json().await.map_err(AiError::transport)?;
        if let Some(err) = body.take_error() {
            return Err(err);
        }
        body.text().ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "generateContent");

        let result = self.request_text(prompt).await;
        if let Err(ref e) = result {
            tracing::warn!("generateContent failed: {}", e);
        }
        result
    }

    fn generate_stream(&self, prompt: &str) -> BoxStream<'static, StreamFragment> {
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "streamGenerateContent");

        let this = self.clone();
        let prompt = prompt.to_string();
        let url = format!("{}?alt=sse", self.endpoint("streamGenerateContent"));

        stream::once(async move { this.post(url, &prompt).await })
            .flat_map(|opened| match opened {
                Ok(response) => sse_fragments(response),
                Err(e) => {
                    tracing::warn!("streamGenerateContent failed: {}", e);
                    stream::iter([StreamFragment::Error(e)]).boxed()
                }
            })
            .boxed()
    }
}

struct SseState {
    bytes: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    decoder: SseDecoder,
    pending: VecDeque<StreamFragment>,
    emitted_text: bool,
    finished: bool,
}

impl SseState {
    /// Queue the fragment for one SSE payload. Returns false once the stream must end.
    fn queue_event(&mut self, payload: &str) -> bool {
        match serde_json::from_str::<GenerateContentResponse>(payload) {
            Ok(mut chunk) => {
                if let Some(err) = chunk.take_error() {
                    self.fail(err);
                    return false;
                }
                if let Some(text) = chunk.text().filter(|t| !t.is_empty()) {
                    self.emitted_text = true;
                    self.pending.push_back(StreamFragment::Text(text));
                }
                true
            }
            Err(e) => {
                self.fail(AiError::Malformed(e.to_string()));
                false
            }
        }
    }

    fn fail(&mut self, err: AiError) {
        tracing::warn!("streamGenerateContent failed mid-stream: {}", err);
        self.pending.push_back(StreamFragment::Error(err));
        self.finished = true;
    }
}

fn sse_fragments(response: reqwest::Response) -> BoxStream<'static, StreamFragment> {
    let state = SseState {
        bytes: response
            .bytes_stream()
            .map(|chunk| chunk.map(|b| b.to_vec()))
            .boxed(),
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        emitted_text: false,
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(fragment) = state.pending.pop_front() {
                return Some((fragment, state));
            }
            if state.finished {
                return None;
            }
            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    for payload in state.decoder.push(&chunk) {
                        if !state.queue_event(&payload) {
                            break;
                        }
                    }
                }
                Some(Err(e)) => state.fail(AiError::transport(e)),
                None => {
                    if let Some(payload) = state.decoder.finish() {
                        state.queue_event(&payload);
                    }
                    // A clean end with no text matches `generate`'s EmptyResponse
                    if !state.finished && !state.emitted_text {
                        state.fail(AiError::EmptyResponse);
                    }
                    state.finished = true;
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> GeminiClient {
        let config = AiConfig {
            base_url: server.uri(),
            ..AiConfig::default()
        };
        GeminiClient::new("test-key".to_string(), &config).unwrap()
    }

    fn reply_body(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|t| serde_json::json!({"text": t})).collect();
        serde_json::json!({"candidates": [{"content": {"role": "model", "parts": parts}}]})
    }

    fn sse_body(chunks: &[&str]) -> String {
        chunks
            .iter()
            .map(|t| format!("data: {}\r\n\r\n", reply_body(&[*t])))
            .collect()
    }

    async fn collect(client: &GeminiClient, prompt: &str) -> Vec<StreamFragment> {
        client.generate_stream(prompt).collect().await
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(reply_body(&["Sure, Friday works!"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let reply = client.generate("Can we reschedule to Friday?").await;
        assert_eq!(reply, Ok("Sure, Friday works!".to_string()));
    }

    #[tokio::test]
    async fn test_generate_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server).generate("hi").await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "An error occurred while communicating with the AI: quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_generate_empty_and_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;
        assert_eq!(
            test_client(&server).generate("hi").await,
            Err(AiError::EmptyResponse)
        );

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        assert!(matches!(
            test_client(&server).generate("hi").await,
            Err(AiError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_unreachable_host() {
        let config = AiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..AiConfig::default()
        };
        let client = GeminiClient::new("k".to_string(), &config).unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, AiError::Transport(_)));
        assert!(
            err.user_message()
                .starts_with("An error occurred while communicating with the AI: ")
        );
    }

    #[tokio::test]
    async fn test_stream_concatenates_to_generate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(reply_body(&["Sure, Friday works!"])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:streamGenerateContent"))
            .and(query_param("alt", "sse"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_body(&["Sure, ", "Friday ", "works!"])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let fragments = collect(&client, "prompt").await;
        assert_eq!(fragments.len(), 3);
        let streamed: String = fragments.into_iter().map(StreamFragment::into_text).collect();
        assert_eq!(streamed, client.generate("prompt").await.unwrap());
    }

    #[tokio::test]
    async fn test_stream_http_error_yields_single_annotation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "API key not valid"}
            })))
            .mount(&server)
            .await;

        let fragments = collect(&test_client(&server), "prompt").await;
        assert_eq!(
            fragments,
            vec![StreamFragment::Error(AiError::Api {
                status: 403,
                message: "API key not valid".to_string()
            })]
        );
        assert_eq!(fragments[0].to_string(), "\n\n**Error:** API key not valid");
    }

    #[tokio::test]
    async fn test_stream_stops_after_bad_chunk() {
        let server = MockServer::start().await;
        let body = format!(
            "{}data: {{not json\n\n{}",
            sse_body(&["Hello"]),
            sse_body(&["never seen"])
        );
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let fragments = collect(&test_client(&server), "prompt").await;
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], StreamFragment::Text("Hello".to_string()));
        assert!(matches!(fragments[1], StreamFragment::Error(AiError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_stream_without_text_reports_empty_response() {
        let server = MockServer::start().await;
        let blocked = serde_json::json!({
            "candidates": [{"finishReason": "SAFETY", "index": 0}]
        });
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(blocked.clone()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:streamGenerateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(format!("data: {}\r\n\r\n", blocked)),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert_eq!(client.generate("prompt").await, Err(AiError::EmptyResponse));
        assert_eq!(
            collect(&client, "prompt").await,
            vec![StreamFragment::Error(AiError::EmptyResponse)]
        );
    }
}
