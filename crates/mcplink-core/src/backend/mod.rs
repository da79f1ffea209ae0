//! Model backend
//!
//! The conversation driver talks to the language model through the
//! `ModelBackend` trait: one non-streaming completion per call, returning
//! any text plus zero-or-more tool-call requests.
//!
//! The production implementation drives the `genai` crate, which handles
//! the provider-specific protocols (OpenAI, Anthropic, Gemini, etc.) and
//! OpenAI-compatible endpoints via a custom service target. `MockBackend`
//! replays a script for tests.

mod error;
mod genai_backend;
mod genai_adapter;
mod mock;
mod traits;

pub use error::{BackendError, BackendResult};
pub use genai_backend::GenaiBackend;
pub use mock::MockBackend;
pub use traits::{ModelBackend, ModelTurn};
