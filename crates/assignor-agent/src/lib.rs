//! Generative-agent invocation for the Assignor pipeline.
//!
//! An agent is an external LLM-backed collaborator invoked with a fixed
//! instruction and one user turn. Its reply arrives as a stream of events,
//! each tagged with an author and a final-response flag; the runner consumes
//! events until it sees the final response authored by the expected agent.
//!
//! # Main types
//!
//! - [`AgentRunner`] — Drives one agent round-trip and extracts the final text.
//! - [`AgentBackend`] — Trait implemented by concrete providers.
//! - [`AgentEvent`] — One event within a round-trip's event stream.
//! - [`ModelConfig`] / [`AgentProvider`] — Provider selection and tuning.

/// Concrete provider backends.
pub mod backends;
/// Model/provider configuration.
pub mod config;
/// Round-trip event types.
pub mod events;
/// The agent runner loop.
pub mod runner;

pub use backends::AgentBackend;
pub use config::{AgentProvider, ModelConfig};
pub use events::AgentEvent;
pub use runner::AgentRunner;
