use crate::backends::AgentBackend;
use crate::events::AgentEvent;
use assignor_core::{AssignorError, AssignorResult, Message};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Drives one generative-agent round-trip.
///
/// The runner holds a fixed instruction and an agent name. A call to
/// [`AgentRunner::run`] opens a fresh session, sends one user turn, and
/// consumes events until the final response authored by the expected agent
/// arrives. There is no retry: a stream that ends without that response is a
/// fatal error for the stage that issued the call.
pub struct AgentRunner {
    name: String,
    instruction: String,
    backend: Box<dyn AgentBackend>,
}

impl AgentRunner {
    /// Creates a runner for the named agent with a fixed instruction.
    pub fn new(
        name: impl Into<String>,
        instruction: impl Into<String>,
        backend: Box<dyn AgentBackend>,
    ) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            backend,
        }
    }

    /// The agent's name, as expected in event authorship.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs one round-trip and returns the agent's final response text.
    pub async fn run(&self, user_turn: &str) -> AssignorResult<String> {
        let session_id = Uuid::new_v4();
        info!(agent = %self.name, session_id = %session_id, "Starting agent round-trip");

        let messages = vec![Message::user(user_turn, session_id)];
        let mut events = self
            .backend
            .converse(&self.name, Some(&self.instruction), &messages)
            .await?;

        let mut last_error: Option<String> = None;

        while let Some(event) = events.recv().await {
            match event {
                AgentEvent::Text {
                    author,
                    text,
                    is_final,
                } => {
                    if is_final && author == self.name {
                        info!(
                            agent = %self.name,
                            session_id = %session_id,
                            chars = text.len(),
                            "Final response received"
                        );
                        return Ok(text.trim().to_string());
                    }
                    debug!(agent = %author, is_final, "Intermediate text event");
                }
                AgentEvent::Error {
                    author,
                    message,
                    detail,
                } => {
                    error!(agent = %author, error = %message, "Agent error event");
                    last_error = Some(match detail {
                        Some(d) => format!("{message} ({d})"),
                        None => message,
                    });
                }
                AgentEvent::Done => break,
            }
        }

        let reason = last_error.map(|e| format!(": {e}")).unwrap_or_default();
        Err(AssignorError::Agent(format!(
            "agent '{}' produced no final response{reason}",
            self.name
        )))
    }
}
