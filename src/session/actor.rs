//! Session actor: runs sign-in against the identity provider off the UI loop

use std::sync::Arc;

use tokio::sync::mpsc;

use super::identity::{AuthError, IdentityProvider, UserProfile};

/// Commands that can be sent to the session actor
#[derive(Debug)]
pub enum SessionCommand {
    SignIn,
    Shutdown,
}

/// Events emitted by the session actor
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SignedIn(UserProfile),
    SignInFailed(AuthError),
}

/// Handle for communicating with the session actor
pub struct SessionActorHandle {
    pub cmd_tx: mpsc::Sender<SessionCommand>,
    pub event_rx: mpsc::Receiver<SessionEvent>,
}

/// Spawn the session actor task
pub fn spawn_session_actor(provider: Arc<dyn IdentityProvider>) -> SessionActorHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(4);
    let (event_tx, event_rx) = mpsc::channel(4);

    tokio::spawn(session_actor_loop(provider, cmd_rx, event_tx));

    SessionActorHandle { cmd_tx, event_rx }
}

async fn session_actor_loop(
    provider: Arc<dyn IdentityProvider>,
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: mpsc::Sender<SessionEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            SessionCommand::SignIn => {
                let event = match provider.authenticate().await {
                    Ok(profile) => SessionEvent::SignedIn(profile),
                    Err(e) => {
                        tracing::warn!("Sign-in failed: {}", e);
                        SessionEvent::SignInFailed(e)
                    }
                };
                if event_tx.send(event).await.is_err() {
                    tracing::warn!("Session actor: event receiver dropped");
                    break;
                }
            }
            SessionCommand::Shutdown => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MockIdentityProvider;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Refusing;

    #[async_trait]
    impl IdentityProvider for Refusing {
        async fn authenticate(&self) -> Result<UserProfile, AuthError> {
            Err(AuthError::Provider("popup closed".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_with_mock_provider() {
        let provider = MockIdentityProvider::new(Duration::from_millis(1500));
        let mut handle = spawn_session_actor(Arc::new(provider));

        handle.cmd_tx.send(SessionCommand::SignIn).await.unwrap();
        match handle.event_rx.recv().await {
            Some(SessionEvent::SignedIn(profile)) => assert_eq!(profile.display_name, "Alex Wolfe"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported() {
        let mut handle = spawn_session_actor(Arc::new(Refusing));

        handle.cmd_tx.send(SessionCommand::SignIn).await.unwrap();
        match handle.event_rx.recv().await {
            Some(SessionEvent::SignInFailed(AuthError::Provider(msg))) => {
                assert_eq!(msg, "popup closed")
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
