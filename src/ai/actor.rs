//! AI actor for async processing of AI requests

use std::sync::Arc;

use tokio::sync::mpsc;

use super::client::TextGenerator;
use super::error::AiError;

/// Commands that can be sent to the AI actor
#[derive(Debug)]
pub enum AiCommand {
    /// Draft a reply for the given prompt
    DraftReply { request_id: u64, prompt: String },
    /// Shutdown the actor
    Shutdown,
}

/// Events emitted by the AI actor
#[derive(Debug, Clone)]
pub enum AiEvent {
    /// A draft request finished, successfully or not
    ReplyDrafted {
        request_id: u64,
        result: Result<String, AiError>,
    },
}

/// Handle for communicating with the AI actor
pub struct AiActorHandle {
    pub cmd_tx: mpsc::Sender<AiCommand>,
    pub event_rx: mpsc::Receiver<AiEvent>,
}

/// Spawn the AI actor task
pub fn spawn_ai_actor(generator: Arc<dyn TextGenerator>) -> AiActorHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(32);

    tokio::spawn(ai_actor_loop(generator, cmd_rx, event_tx));

    AiActorHandle { cmd_tx, event_rx }
}

async fn ai_actor_loop(
    generator: Arc<dyn TextGenerator>,
    mut cmd_rx: mpsc::Receiver<AiCommand>,
    event_tx: mpsc::Sender<AiEvent>,
) {
    tracing::debug!("AI actor started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            AiCommand::DraftReply { request_id, prompt } => {
                tracing::info!(request_id, "Drafting reply");
                let result = generator.generate(&prompt).await;

                let event = AiEvent::ReplyDrafted { request_id, result };
                if event_tx.send(event).await.is_err() {
                    tracing::warn!("AI actor: event receiver dropped");
                    break;
                }
            }

            AiCommand::Shutdown => {
                break;
            }
        }
    }

    tracing::debug!("AI actor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::StreamFragment;
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream, StreamExt};

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, prompt: &str) -> Result<String, AiError> {
            if prompt == "fail" {
                Err(AiError::Unknown)
            } else {
                Ok(prompt.to_uppercase())
            }
        }

        fn generate_stream(&self, prompt: &str) -> BoxStream<'static, StreamFragment> {
            stream::iter([StreamFragment::Text(prompt.to_string())]).boxed()
        }
    }

    #[tokio::test]
    async fn test_draft_reply_round_trip() {
        let mut handle = spawn_ai_actor(Arc::new(Echo));

        handle
            .cmd_tx
            .send(AiCommand::DraftReply {
                request_id: 7,
                prompt: "hello".to_string(),
            })
            .await
            .unwrap();

        let AiEvent::ReplyDrafted { request_id, result } = handle.event_rx.recv().await.unwrap();
        assert_eq!(request_id, 7);
        assert_eq!(result, Ok("HELLO".to_string()));
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_dropped() {
        let mut handle = spawn_ai_actor(Arc::new(Echo));

        handle
            .cmd_tx
            .send(AiCommand::DraftReply {
                request_id: 1,
                prompt: "fail".to_string(),
            })
            .await
            .unwrap();

        let AiEvent::ReplyDrafted { result, .. } = handle.event_rx.recv().await.unwrap();
        assert_eq!(result, Err(AiError::Unknown));
    }

    #[tokio::test]
    async fn test_shutdown_closes_events() {
        let mut handle = spawn_ai_actor(Arc::new(Echo));
        handle.cmd_tx.send(AiCommand::Shutdown).await.unwrap();
        assert!(handle.event_rx.recv().await.is_none());
    }
}
