//! Chat-completion backend for grammar correction.
//!
//! Talks to an OpenRouter-compatible chat-completion endpoint. The HTTP
//! transport sits behind the [`transport::HttpExchange`] trait so tests can
//! drive the client without a network.

pub mod client;
pub mod error;
pub mod prompt;
pub mod transport;
pub mod types;

pub use client::{CorrectionBackend, OpenRouterClient};
pub use error::LlmError;
pub use transport::{HttpExchange, HttpRequest, ReqwestExchange};
