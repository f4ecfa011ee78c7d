use serde::{Deserialize, Serialize};

/// Events emitted during one agent round-trip.
///
/// The consumer reads events until it sees a [`AgentEvent::Text`] marked
/// final and authored by the agent it is waiting for. A stream that closes
/// without such an event means the round-trip produced no final response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Text content authored by an agent.
    Text {
        /// Name of the agent that authored this text.
        author: String,
        /// The text segment.
        text: String,
        /// Whether this is the author's final response for the round-trip.
        is_final: bool,
    },

    /// An error reported by the agent runtime.
    Error {
        /// Name of the agent (or runtime component) reporting the error.
        author: String,
        /// Human-readable error message.
        message: String,
        /// Optional additional detail, e.g. a response body.
        detail: Option<String>,
    },

    /// The event stream has ended.
    Done,
}
