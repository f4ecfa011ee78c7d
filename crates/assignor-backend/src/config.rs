use serde::{Deserialize, Serialize};

/// Configuration for the question-answering backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend agent, up to but not including `/sessions/...`.
    pub base_url: String,
    /// Timezone hint sent with every query.
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
    /// Per-call network timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Project billed for the calls, sent as `x-goog-user-project` when set.
    #[serde(default)]
    pub quota_project: Option<String>,
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

fn default_timeout_secs() -> u64 {
    90
}
