//! AI features module for drafting email replies
//!
//! This module talks to the Gemini Generative Language API:
//! - One-shot generation used by the interactive composer
//! - Streaming generation used by the `draft` command

mod actor;
mod client;
mod error;
pub mod prompts;
mod sse;
mod wire;

pub use actor::{AiActorHandle, AiCommand, AiEvent, spawn_ai_actor};
pub use client::{GeminiClient, StreamFragment, TextGenerator};
pub use error::AiError;
