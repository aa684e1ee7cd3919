use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use async_trait::async_trait;
use log::debug;

use super::{ assistant_reply, check_status, wire_messages, ChatClient, WireMessage };
use crate::error::{ ConfigError, GatewayError };
use crate::llm::{ LlmConfig, LlmType };
use crate::models::chat::ChatMessage;

#[derive(Debug)]
pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
    completion_model: String,
    system_prompt: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<WireMessage>,
}

impl OllamaClient {
    pub fn new(
        base_url: Option<String>,
        completion_model: Option<String>,
        system_prompt: Option<String>
    ) -> Self {
        let model = completion_model.unwrap_or_else(|| "llama3".to_string());
        let url = base_url.unwrap_or_else(|| "http://localhost:11434".into());

        Self {
            http: HttpClient::new(),
            base_url: url,
            completion_model: model,
            system_prompt,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ConfigError> {
        if config.llm_type != LlmType::Ollama {
            return Err(ConfigError::ClientBuild {
                provider: config.llm_type.to_string(),
                reason: "invalid config type for OllamaClient".to_string(),
            });
        }

        Ok(
            Self::new(
                config.base_url.clone(),
                config.completion_model.clone(),
                config.system_prompt.clone()
            )
        )
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn generate(&self, transcript: &[ChatMessage]) -> Result<ChatMessage, GatewayError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let req = ChatRequest {
            model: self.completion_model.clone(),
            messages: wire_messages(self.system_prompt.as_deref(), transcript),
            stream: false,
        };
        debug!("OllamaClient::generate() → url={} model={}", url, self.completion_model);

        let resp = self.http.post(&url).json(&req).send().await?;
        let data = check_status(resp)
            .await?
            .json::<ChatResponse>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        let message = data.message.ok_or(GatewayError::EmptyResponse)?;
        assistant_reply(Some(message.role.as_str()), Some(message.content))
    }

    fn get_model(&self) -> String {
        self.completion_model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
