use crate::auth::CredentialSource;
use crate::config::BackendConfig;
use assignor_core::{AssignorError, AssignorResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Client for the `detectIntent`-style question-answering backend.
///
/// Each call is an independent conversation: the caller supplies a fresh
/// session id and the backend treats it as a new session. One fixed network
/// timeout applies uniformly to every call.
pub struct IntentClient {
    config: BackendConfig,
    credentials: Arc<dyn CredentialSource>,
    http: reqwest::Client,
}

impl IntentClient {
    /// Builds a client with the configured per-call timeout.
    pub fn new(
        config: BackendConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> AssignorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssignorError::Transport(e.to_string()))?;
        Ok(Self {
            config,
            credentials,
            http,
        })
    }

    /// The backend configuration in use.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Asks one free-text question under the given session id and returns
    /// the answer text.
    ///
    /// Outcomes are classified into transport failure, non-2xx status, or
    /// malformed payload; only a well-shaped 2xx reply yields text.
    pub async fn ask(&self, question: &str, session_id: Uuid) -> AssignorResult<String> {
        let token = self.credentials.bearer_token().await?;
        let url = format!(
            "{}/sessions/{}:detectIntent",
            self.config.base_url, session_id
        );

        debug!(session_id = %session_id, "Dispatching backend question");

        let body = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput { text: question },
                language_code: "en",
            },
            query_params: QueryParams {
                time_zone: &self.config.default_timezone,
            },
        };

        let mut request = self.http.post(&url).bearer_auth(token).json(&body);
        if let Some(project) = &self.config.quota_project {
            request = request.header("x-goog-user-project", project);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| AssignorError::Transport(e.to_string()))?;

        let status = resp.status();
        let body_text = resp
            .text()
            .await
            .map_err(|e| AssignorError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AssignorError::Status {
                code: status.as_u16(),
                body: body_text,
            });
        }

        let parsed: DetectIntentResponse = serde_json::from_str(&body_text)
            .map_err(|e| AssignorError::Payload(format!("invalid JSON: {e}")))?;

        parsed
            .answer_text()
            .map(|t| t.trim().to_string())
            .ok_or_else(|| {
                AssignorError::Payload(
                    "missing queryResult.responseMessages[0].text.text[0]".to_string(),
                )
            })
    }
}

// -- Wire types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest<'a> {
    query_input: QueryInput<'a>,
    query_params: QueryParams<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryInput<'a> {
    text: TextInput<'a>,
    language_code: &'a str,
}

#[derive(Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryParams<'a> {
    time_zone: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: Option<QueryResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    #[serde(default)]
    response_messages: Vec<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    text: Option<TextBlock>,
}

#[derive(Deserialize)]
struct TextBlock {
    #[serde(default)]
    text: Vec<String>,
}

impl DetectIntentResponse {
    fn answer_text(&self) -> Option<&str> {
        self.query_result
            .as_ref()?
            .response_messages
            .first()?
            .text
            .as_ref()?
            .text
            .first()
            .map(String::as_str)
    }
}
