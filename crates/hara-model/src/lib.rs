//! Text-generation collaborator boundary.
//!
//! The kernel never talks to a provider directly: it consumes raw text that
//! a [`TextGenerator`] produced. This crate defines that seam (chat
//! messages, expected format, the generator trait and its error taxonomy),
//! an OpenAI-compatible HTTP adapter, and a scripted test double for
//! deterministic pipeline tests.

mod error;
mod generator;
mod openai;
mod scripted;

pub use error::ModelError;
pub use generator::{ChatMessage, ExpectedFormat, Role, TextGenerator};
pub use openai::{OpenAiConfig, OpenAiGenerator, OPENAI_AUTH_ENV_VAR};
pub use scripted::ScriptedGenerator;
