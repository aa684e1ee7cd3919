pub mod chat;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmType {
    Gemini,
    OpenAI,
    Anthropic,
    Ollama,
}

impl fmt::Display for LlmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LlmType::Gemini => "gemini",
            LlmType::OpenAI => "openai",
            LlmType::Anthropic => "anthropic",
            LlmType::Ollama => "ollama",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LlmType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" | "google_genai" => Ok(LlmType::Gemini),
            "openai" => Ok(LlmType::OpenAI),
            "anthropic" | "claude" => Ok(LlmType::Anthropic),
            "ollama" => Ok(LlmType::Ollama),
            _ => Err(ConfigError::UnsupportedLlmType(s.to_string())),
        }
    }
}

/// Everything a chat client needs to reach its provider. Built once at
/// startup and never mutated afterwards.
#[derive(Clone)]
pub struct LlmConfig {
    pub llm_type: LlmType,
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    pub system_prompt: Option<String>,
}

impl LlmConfig {
    pub fn require_api_key(&self) -> Result<String, ConfigError> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                provider: self.llm_type.to_string(),
                env_vars: match self.llm_type {
                    LlmType::Gemini => "CHAT_API_KEY or GOOGLE_API_KEY",
                    _ => "CHAT_API_KEY",
                },
            })
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("llm_type", &self.llm_type)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("completion_model", &self.completion_model)
            .field("base_url", &self.base_url)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_type: LlmType::Gemini,
            api_key: None,
            completion_model: None,
            base_url: None,
            system_prompt: None,
        }
    }
}
