use thiserror::Error;

/// Failures detected while turning process configuration into a running
/// service. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported LLM type: '{0}'")]
    UnsupportedLlmType(String),

    #[error("{provider} API key is required (set {env_vars})")]
    MissingApiKey { provider: String, env_vars: &'static str },

    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),

    #[error("Both --tls-cert-path and --tls-key-path must be provided to enable TLS")]
    IncompleteTls,

    #[error("Failed to build {provider} client: {reason}")]
    ClientBuild { provider: String, reason: String },
}

/// Failures of a single call to the model provider.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request to model provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Malformed response from model provider: {0}")]
    Malformed(String),

    #[error("Model provider returned an empty reply")]
    EmptyResponse,
}
