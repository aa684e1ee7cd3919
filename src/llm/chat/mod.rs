pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use super::{ LlmConfig, LlmType };
use self::ollama::OllamaClient;
use self::openai::OpenAIChatClient;
use crate::error::{ ConfigError, GatewayError };
use crate::models::chat::{ ChatMessage, Role };

/// The model gateway: turns a transcript into the next assistant turn.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn generate(&self, transcript: &[ChatMessage]) -> Result<ChatMessage, GatewayError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ConfigError> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Gemini | LlmType::OpenAI | LlmType::Anthropic => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::Ollama => {
            let specific_client = OllamaClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

/// Wire shape shared by the OpenAI-style and Ollama chat endpoints.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub(crate) struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Builds the outgoing message list: optional system prompt first, then the
/// transcript in order.
pub(crate) fn wire_messages(
    system_prompt: Option<&str>,
    transcript: &[ChatMessage]
) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    if let Some(prompt) = system_prompt.filter(|p| !p.trim().is_empty()) {
        messages.push(WireMessage { role: "system".to_string(), content: prompt.to_string() });
    }
    messages.extend(
        transcript.iter().map(|m| WireMessage {
            role: m.role().as_str().to_string(),
            content: m.content().to_string(),
        })
    );
    messages
}

/// Checks a reply pulled out of a provider payload and wraps it as the
/// assistant turn.
pub(crate) fn assistant_reply(
    role: Option<&str>,
    content: Option<String>
) -> Result<ChatMessage, GatewayError> {
    if let Some(role) = role {
        if role != Role::Assistant.as_str() {
            return Err(GatewayError::Malformed(format!("unexpected reply role '{}'", role)));
        }
    }
    match content {
        Some(text) if !text.trim().is_empty() => Ok(ChatMessage::assistant(text)),
        _ => Err(GatewayError::EmptyResponse),
    }
}

/// Turns a non-success response into `GatewayError::Status`, keeping the body
/// for the logs.
pub(crate) async fn check_status(
    resp: reqwest::Response
) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::Status { status: status.as_u16(), body })
}
