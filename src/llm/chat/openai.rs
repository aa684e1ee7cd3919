use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION}};
use serde::{Deserialize, Serialize};

use super::{assistant_reply, check_status, wire_messages, ChatClient, WireMessage};
use crate::error::{ConfigError, GatewayError};
use crate::llm::{LlmConfig, LlmType};
use crate::models::chat::ChatMessage;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Client for `/chat/completions` endpoints. Also serves Gemini and Anthropic
/// through their OpenAI-compatible APIs.
pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    system_prompt: Option<String>,
}

#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIReplyMessage,
}

#[derive(Deserialize)]
struct OpenAIReplyMessage {
    role: Option<String>,
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        llm_type: LlmType,
        api_key: String,
        model: String,
        base_url: String,
        system_prompt: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| ConfigError::InvalidApiKey(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::ClientBuild {
                provider: llm_type.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            model,
            base_url,
            system_prompt,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?;

        let (default_model, default_base_url) = match config.llm_type {
            LlmType::Gemini => ("gemini-2.0-flash", GEMINI_BASE_URL),
            LlmType::Anthropic => ("claude-3-5-sonnet-latest", ANTHROPIC_BASE_URL),
            _ => ("gpt-4o", OPENAI_BASE_URL),
        };

        Self::new(
            config.llm_type,
            api_key,
            config.completion_model.clone().unwrap_or_else(|| default_model.to_string()),
            config.base_url.clone().unwrap_or_else(|| default_base_url.to_string()),
            config.system_prompt.clone(),
        )
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn generate(&self, transcript: &[ChatMessage]) -> Result<ChatMessage, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let req = OpenAIChatRequest {
            model: self.model.clone(),
            messages: wire_messages(self.system_prompt.as_deref(), transcript),
            stream: Some(false),
        };

        debug!("OpenAIChatClient::generate() → url={} model={}", url, self.model);
        let resp = self.http.post(&url).json(&req).send().await?;
        let body = check_status(resp)
            .await?
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        let message = body.choices
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResponse)?
            .message;

        assistant_reply(message.role.as_deref(), message.content)
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
