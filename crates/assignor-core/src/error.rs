use thiserror::Error;

/// A convenience `Result` alias using [`AssignorError`].
pub type AssignorResult<T> = Result<T, AssignorError>;

/// Top-level error type for the Assignor pipeline.
///
/// Variants map onto the failure taxonomy of the pipeline: generative-agent
/// faults, the three classes of backend-call failure (transport, HTTP status,
/// payload shape), credential acquisition, configuration, and the aggregated
/// fan-out abort.
#[derive(Debug, Error)]
pub enum AssignorError {
    /// An error originating from a generative agent round-trip, including the
    /// stream ending without a final authored response.
    #[error("Agent error: {0}")]
    Agent(String),

    /// A network-level failure on an outbound HTTP request.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-2xx HTTP status from the question-answering backend.
    #[error("Backend returned HTTP {code}: {body}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The response body, verbatim.
        body: String,
    },

    /// A response body that is not valid JSON or is missing expected fields.
    #[error("Malformed backend payload: {0}")]
    Payload(String),

    /// Failure to obtain a bearer credential.
    #[error("Credential error: {0}")]
    Credential(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// One or more sub-question calls failed during fan-out. Every failing
    /// sub-question is reported; the whole batch settles before this is
    /// raised.
    #[error("{} backend call(s) failed: {}", .0.len(), .0.join("; "))]
    FanOut(Vec<String>),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
