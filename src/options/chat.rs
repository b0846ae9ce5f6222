use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Chat", inline)]
#[serde(default)]
/// Hosted language model used by the biochemistry assistant.
pub struct ChatOptions {
    /// Messages endpoint.
    #[schemars(title = "Endpoint")]
    pub endpoint: String,
    /// Model name sent with every request.
    #[schemars(title = "Model")]
    pub model: String,
    /// Reply length cap.
    #[schemars(title = "Max Tokens", range(min = 1, max = 8192))]
    pub max_tokens: u32,
    /// Environment variable holding the API key.
    #[schemars(title = "API Key Variable")]
    pub api_key_env: String,
    /// Request timeout.
    #[schemars(title = "Timeout (seconds)", range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".into(),
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 1024,
            api_key_env: "ANTHROPIC_API_KEY".into(),
            timeout_secs: 60,
        }
    }
}
