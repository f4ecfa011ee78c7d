use super::AgentBackend;
use crate::config::ModelConfig;
use crate::events::AgentEvent;
use assignor_core::{AssignorError, AssignorResult, Message, Role};
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

/// Google Gemini `generateContent` backend.
pub struct GeminiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl GeminiBackend {
    /// Creates a backend for the given model configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AgentBackend for GeminiBackend {
    async fn converse(
        &self,
        agent: &str,
        instruction: Option<&str>,
        messages: &[Message],
    ) -> AssignorResult<mpsc::Receiver<AgentEvent>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            self.config.model_id
        );

        let contents: Vec<GeminiContent> = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| GeminiContent {
                role: match m.role {
                    Role::Assistant => "model",
                    _ => "user",
                },
                parts: vec![GeminiPart {
                    text: m.content.clone(),
                }],
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
            },
        });

        if let Some(sys) = instruction {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": sys }],
            });
        }

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssignorError::Transport(e.to_string()))?;

        let status = resp.status();
        let resp_body = resp
            .text()
            .await
            .map_err(|e| AssignorError::Transport(e.to_string()))?;

        let (tx, rx) = mpsc::channel::<AgentEvent>(8);

        if !status.is_success() {
            let _ = tx
                .send(AgentEvent::Error {
                    author: agent.to_string(),
                    message: format!("Gemini API error {status}"),
                    detail: Some(resp_body),
                })
                .await;
            let _ = tx.send(AgentEvent::Done).await;
            return Ok(rx);
        }

        match extract_text(&resp_body) {
            Ok(text) => {
                let _ = tx
                    .send(AgentEvent::Text {
                        author: agent.to_string(),
                        text,
                        is_final: true,
                    })
                    .await;
            }
            Err(message) => {
                let _ = tx
                    .send(AgentEvent::Error {
                        author: agent.to_string(),
                        message,
                        detail: Some(resp_body),
                    })
                    .await;
            }
        }
        let _ = tx.send(AgentEvent::Done).await;

        Ok(rx)
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a Gemini reply.
fn extract_text(body: &str) -> Result<String, String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON in Gemini response: {e}"))?;

    value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|t| t.to_string())
        .ok_or_else(|| "missing candidate text in Gemini response".to_string())
}

// -- Gemini wire types --

#[derive(Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}
