use clap::Parser;

use crate::error::ConfigError;
use crate::llm::{ LlmConfig, LlmType };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (gemini, openai, anthropic, ollama)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "gemini")]
    pub chat_llm_type: String,

    /// Base URL for the Chat LLM provider API (e.g., http://localhost:11434 for Ollama)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let adapters handle defaults if None
    pub chat_base_url: Option<String>,

    /// API Key for the Chat LLM provider
    #[arg(long, env = "CHAT_API_KEY", hide_env_values = true)]
    pub chat_api_key: Option<String>,

    /// Google API key, used for the gemini provider when CHAT_API_KEY is not set
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Model name for chat completion (e.g., gemini-2.0-flash, gpt-4o, llama3)
    #[arg(long, env = "CHAT_MODEL")] // No default, rely on adapter defaults if None
    pub chat_model: Option<String>,

    /// Optional system instruction sent to the provider ahead of the user's query
    #[arg(long, env = "SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    // --- Server Args ---
    /// Host address and port for the HTTP server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:8000")]
    pub server_addr: String,

    /// Allow cross-origin requests from any origin.
    #[arg(long, env = "ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Optional path to the TLS certificate file (PEM format) for enabling HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

impl Args {
    /// Resolves the chat provider settings. Provider-specific credential
    /// checks happen when the client is built.
    pub fn chat_config(&self) -> Result<LlmConfig, ConfigError> {
        let llm_type: LlmType = self.chat_llm_type.parse()?;

        let api_key = match llm_type {
            LlmType::Gemini => non_blank(&self.chat_api_key).or_else(|| non_blank(&self.google_api_key)),
            _ => non_blank(&self.chat_api_key),
        };

        Ok(LlmConfig {
            llm_type,
            api_key,
            completion_model: non_blank(&self.chat_model),
            base_url: non_blank(&self.chat_base_url),
            system_prompt: non_blank(&self.system_prompt),
        })
    }

    /// Certificate and key paths when TLS is switched on, `None` otherwise.
    pub fn tls_paths(&self) -> Result<Option<(String, String)>, ConfigError> {
        if !self.enable_tls {
            return Ok(None);
        }
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Ok(Some((cert.clone(), key.clone()))),
            _ => Err(ConfigError::IncompleteTls),
        }
    }
}
