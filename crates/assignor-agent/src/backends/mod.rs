/// Google Gemini backend.
pub mod gemini;

use crate::events::AgentEvent;
use assignor_core::{AssignorResult, Message};
use async_trait::async_trait;
use tokio::sync::mpsc;

pub use gemini::GeminiBackend;

/// Trait for generative-agent provider backends.
///
/// A backend performs one conversation round-trip and yields the resulting
/// events through a channel. The transport-level request failure is returned
/// directly; everything that happens after a connection is established
/// (status errors, malformed replies, the final text) arrives as events so
/// the consumer sees the same stream shape for every provider.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Runs one round-trip for the named agent and returns its event stream.
    async fn converse(
        &self,
        agent: &str,
        instruction: Option<&str>,
        messages: &[Message],
    ) -> AssignorResult<mpsc::Receiver<AgentEvent>>;
}
