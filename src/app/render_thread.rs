//! Background render thread for non-blocking UI rendering.
//!
//! The render thread owns the Terminal and renders snapshots of AppState
//! sent from the main event loop, so the loop stays responsive to actor
//! events and user input.

use std::io;
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::state::AppState;

/// Command sent to the render thread.
pub enum RenderCommand {
    /// Render this state snapshot
    Render(Box<AppState>),
    Shutdown,
}

/// Handle to the background render thread.
pub struct RenderThread {
    cmd_tx: SyncSender<RenderCommand>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Spawn a new render thread.
    ///
    /// The render thread takes ownership of terminal setup/teardown.
    pub fn spawn() -> io::Result<Self> {
        // Capacity 1: only the latest state matters
        let (cmd_tx, cmd_rx) = mpsc::sync_channel::<RenderCommand>(1);

        let handle = thread::Builder::new()
            .name("render".to_string())
            .spawn(move || {
                if let Err(e) = enable_raw_mode() {
                    tracing::error!("Failed to enable raw mode: {}", e);
                    return;
                }

                let mut stdout = io::stdout();
                if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste) {
                    tracing::error!("Failed to enter alternate screen: {}", e);
                    disable_raw_mode().ok();
                    return;
                }

                let backend = CrosstermBackend::new(stdout);
                let mut terminal = match Terminal::new(backend) {
                    Ok(t) => t,
                    Err(e) => {
                        tracing::error!("Failed to create terminal: {}", e);
                        disable_raw_mode().ok();
                        return;
                    }
                };

                while let Ok(cmd) = cmd_rx.recv() {
                    match cmd {
                        RenderCommand::Render(state) => {
                            if let Err(e) = terminal.draw(|f| crate::ui::render(f, &state)) {
                                tracing::error!("Render error: {}", e);
                            }
                        }
                        RenderCommand::Shutdown => break,
                    }
                }

                disable_raw_mode().ok();
                execute!(
                    terminal.backend_mut(),
                    DisableBracketedPaste,
                    LeaveAlternateScreen
                )
                .ok();
                terminal.show_cursor().ok();
            })?;

        Ok(Self {
            cmd_tx,
            handle: Some(handle),
        })
    }

    /// Request a render of the given state (non-blocking).
    ///
    /// If the render thread is still busy with the previous frame, this one is dropped.
    pub fn render(&self, state: AppState) {
        match self.cmd_tx.try_send(RenderCommand::Render(Box::new(state))) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::trace!("Render thread busy, skipping frame");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Render thread disconnected");
            }
        }
    }

    /// Shutdown the render thread and wait for it to finish.
    pub fn shutdown(mut self) {
        // Blocking send so the shutdown is not dropped like a frame
        let _ = self.cmd_tx.send(RenderCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}
