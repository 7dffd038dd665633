//! Application core - owns state and coordinates the session and AI actors

mod actions;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;
use ratatui::layout::Rect;
use std::sync::Arc;

use render_thread::RenderThread;

use crate::ai::{AiActorHandle, AiCommand, TextGenerator, spawn_ai_actor};
use crate::clipboard::ClipboardSink;
use crate::config::Config;
use crate::input::KeyBindings;
use crate::reply::ReplyForm;
use crate::session::{
    IdentityProvider, SessionActorHandle, SessionCommand, spawn_session_actor,
};
use state::AppState;

pub struct App {
    pub(crate) config: Config,
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    pub(crate) ai_actor: AiActorHandle,
    pub(crate) session_actor: SessionActorHandle,
    pub(crate) clipboard: Box<dyn ClipboardSink>,
    /// Terminal size, tracked from resize events for scroll limits
    pub(crate) viewport: Rect,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    /// Spawns the AI and session actors; must be called inside a tokio runtime
    pub fn new(
        config: Config,
        generator: Arc<dyn TextGenerator>,
        identity: Arc<dyn IdentityProvider>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let bindings = KeyBindings::new(&config.ui.keybinding_mode);

        let state = AppState {
            form: ReplyForm::new(config.ui.default_tone),
            ..Default::default()
        };

        Self {
            ai_actor: spawn_ai_actor(generator),
            session_actor: spawn_session_actor(identity),
            config,
            state,
            bindings,
            clipboard,
            viewport: crossterm::terminal::size()
                .map(|(width, height)| Rect::new(0, 0, width, height))
                .unwrap_or_else(|_| Rect::new(0, 0, 80, 24)),
            dirty: true, // Start dirty for initial render
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        let result = self.event_loop(&render_thread).await;

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        self.shutdown_actors();

        result
    }

    fn shutdown_actors(&self) {
        // Best effort: the actors also stop once their command senders drop
        self.ai_actor.cmd_tx.try_send(AiCommand::Shutdown).ok();
        self.session_actor
            .cmd_tx
            .try_send(SessionCommand::Shutdown)
            .ok();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ai::{AiError, StreamFragment};
    use crate::clipboard::ClipboardError;
    use crate::session::MockIdentityProvider;
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream, StreamExt};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Generator that replays one canned result for every prompt
    pub struct Canned {
        pub result: Result<String, AiError>,
        pub prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, prompt: &str) -> Result<String, AiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.result.clone()
        }

        fn generate_stream(&self, _prompt: &str) -> BoxStream<'static, StreamFragment> {
            stream::empty().boxed()
        }
    }

    /// Clipboard whose writes stay visible to the test after the app takes it
    #[derive(Clone, Default)]
    pub struct SharedClipboard {
        pub writes: Arc<Mutex<Vec<String>>>,
        pub fail: bool,
    }

    impl ClipboardSink for SharedClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("no display".to_string()));
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    pub fn test_app(
        result: Result<String, AiError>,
        clipboard: SharedClipboard,
    ) -> (App, Arc<Canned>) {
        let mut config = Config::default();
        config.notifications.enabled = false;

        let generator = Arc::new(Canned {
            result,
            prompts: Mutex::new(Vec::new()),
        });
        let identity = Arc::new(MockIdentityProvider::new(Duration::from_millis(
            config.session.sign_in_delay_ms,
        )));
        let mut app = App::new(config, generator.clone(), identity, Box::new(clipboard));
        app.viewport = Rect::new(0, 0, 100, 30);
        (app, generator)
    }
}
