use serde::{Deserialize, Serialize};

/// The generative-model provider behind an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentProvider {
    /// Google Gemini via the `generateContent` REST API.
    Gemini,
}

/// Configuration for one generative model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which provider to talk to.
    pub provider: AgentProvider,
    /// Provider-specific model identifier, e.g. `gemini-2.0-flash`.
    pub model_id: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Override for the provider's base URL (used by tests and proxies).
    pub api_base_url: Option<String>,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens per round-trip.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    4096
}

impl ModelConfig {
    /// The base URL for API calls, honoring the `api_base_url` override.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                AgentProvider::Gemini => "https://generativelanguage.googleapis.com",
            }
        }
    }
}
