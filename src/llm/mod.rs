//! Text-generation capability.
//!
//! The pipeline consumes generation through the [`GenerationClient`] trait,
//! so any backend can be swapped in (including scripted fakes in tests).
//! One production implementation ships behind the `openai` feature:
//! [`OpenAiClient`], which talks to any OpenAI-compatible chat-completions
//! endpoint.

pub mod client;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{GenerationClient, GenerationRequest};

#[cfg(feature = "openai")]
pub use openai::OpenAiClient;
