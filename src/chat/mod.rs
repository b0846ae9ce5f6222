//! Biochemistry chat assistant backed by a hosted language model.
//!
//! Request and response shaping are plain functions over `serde_json`
//! values; `ChatClient` (feature `net`) adds the HTTP call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[cfg(feature = "net")]
use crate::error::MolscopeError;
use crate::options::ChatOptions;

/// System prompt sent with every conversation.
pub const SYSTEM_PROMPT: &str = "You are a biochemistry expert AI assistant. \
You explain protein structures, functions, biochemical pathways, and \
molecular biology concepts. Be detailed but accessible to an advanced high \
school / early college student. When referencing specific proteins, mention \
their PDB IDs so the user can look them up.";

/// Reply used when the model returns no text block.
pub const EMPTY_REPLY: &str = "No response generated.";

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person asking.
    User,
    /// The model.
    Assistant,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote it.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A user turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Messages API request body for `messages`.
#[must_use]
pub fn request_body(options: &ChatOptions, messages: &[ChatMessage]) -> Value {
    json!({
        "model": options.model,
        "max_tokens": options.max_tokens,
        "system": SYSTEM_PROMPT,
        "messages": messages,
    })
}

/// Text of the first `text` content block, or [`EMPTY_REPLY`].
#[must_use]
pub fn reply_text(response: &Value) -> String {
    response
        .get("content")
        .and_then(Value::as_array)
        .and_then(|blocks| {
            blocks.iter().find(|b| {
                b.get("type").and_then(Value::as_str) == Some("text")
            })
        })
        .and_then(|b| b.get("text"))
        .and_then(Value::as_str)
        .unwrap_or(EMPTY_REPLY)
        .to_owned()
}

#[cfg(feature = "net")]
const API_VERSION: &str = "2023-06-01";

/// Blocking client for the messages endpoint.
#[cfg(feature = "net")]
pub struct ChatClient {
    agent: ureq::Agent,
    api_key: String,
    options: ChatOptions,
}

#[cfg(feature = "net")]
impl ChatClient {
    /// Client reading its key from the environment variable named in
    /// `options`.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::Configuration`] when the variable is unset or empty.
    pub fn from_env(options: ChatOptions) -> Result<Self, MolscopeError> {
        let api_key = std::env::var(&options.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                MolscopeError::Configuration(format!(
                    "{} is not configured; set it to enable AI chat",
                    options.api_key_env
                ))
            })?;
        Ok(Self::with_api_key(options, api_key))
    }

    /// Client with an explicit key.
    #[must_use]
    pub fn with_api_key(options: ChatOptions, api_key: String) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(std::time::Duration::from_secs(
                options.timeout_secs,
            )))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            api_key,
            options,
        }
    }

    /// Send the conversation and return the assistant's reply.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::Network`] on transport failure or an error status.
    pub fn send(&self, messages: &[ChatMessage]) -> Result<String, MolscopeError> {
        let body = request_body(&self.options, messages);
        log::debug!(
            "chat request: {} messages to {}",
            messages.len(),
            self.options.model
        );
        let mut response = self
            .agent
            .post(&self.options.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .send_json(&body)
            .map_err(|e| MolscopeError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let payload: Value = response.body_mut().read_json().map_err(|e| {
            MolscopeError::Network(format!("invalid chat response: {e}"))
        })?;
        if status >= 400 {
            let message = payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("failed to get AI response");
            return Err(MolscopeError::Network(format!(
                "HTTP {status}: {message}"
            )));
        }
        Ok(reply_text(&payload))
    }
}
