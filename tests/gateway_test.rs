//! Provider adapters against mock HTTP servers.

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use chat_relay::error::GatewayError;
use chat_relay::llm::chat::ollama::OllamaClient;
use chat_relay::llm::chat::openai::OpenAIChatClient;
use chat_relay::llm::chat::{new_client, ChatClient};
use chat_relay::llm::{LlmConfig, LlmType};
use chat_relay::models::chat::ChatMessage;
use chat_relay::orchestrator::Orchestrator;

fn openai_client(server: &MockServer, system_prompt: Option<&str>) -> OpenAIChatClient {
    OpenAIChatClient::new(
        LlmType::OpenAI,
        "test-key".to_string(),
        "gpt-4o".to_string(),
        format!("{}/v1", server.uri()),
        system_prompt.map(str::to_string),
    )
    .unwrap()
}

#[tokio::test]
async fn test_openai_generates_assistant_turn() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "messages": [{ "role": "user", "content": "What is 2+2?" }],
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "4" },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = openai_client(&server, None);
    let reply = client.generate(&[ChatMessage::user("What is 2+2?")]).await.unwrap();

    assert_eq!(reply, ChatMessage::assistant("4"));
}

#[tokio::test]
async fn test_openai_sends_system_prompt_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "Answer tersely." },
                { "role": "user", "content": "hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "hey" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = openai_client(&server, Some("Answer tersely."));
    let reply = client.generate(&[ChatMessage::user("hi")]).await.unwrap();

    assert_eq!(reply.content(), "hey");
}

#[tokio::test]
async fn test_openai_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = openai_client(&server, None);
    let err = client.generate(&[ChatMessage::user("hi")]).await.unwrap_err();

    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_without_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = openai_client(&server, None);
    let err = client.generate(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert!(matches!(err, GatewayError::EmptyResponse));
}

#[tokio::test]
async fn test_openai_non_json_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = openai_client(&server, None);
    let err = client.generate(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert!(matches!(err, GatewayError::Malformed(_)));
}

fn gemini_client(server: &MockServer, system_prompt: Option<&str>) -> std::sync::Arc<dyn ChatClient> {
    let config = LlmConfig {
        llm_type: LlmType::Gemini,
        api_key: Some("google-key".to_string()),
        completion_model: None,
        base_url: Some(format!("{}/v1beta/openai", server.uri())),
        system_prompt: system_prompt.map(str::to_string),
    };
    new_client(&config).unwrap()
}

#[tokio::test]
async fn test_gemini_generates_assistant_turn_at_configured_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/openai/chat/completions"))
        .and(header("authorization", "Bearer google-key"))
        .and(body_partial_json(json!({
            "model": "gemini-2.0-flash",
            "messages": [{ "role": "user", "content": "What is 2+2?" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "4" },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = gemini_client(&server, None);
    let reply = client.generate(&[ChatMessage::user("What is 2+2?")]).await.unwrap();

    assert_eq!(reply, ChatMessage::assistant("4"));
}

#[tokio::test]
async fn test_gemini_sends_system_prompt_before_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/openai/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "You are a calculator." },
                { "role": "user", "content": "What is 2+2?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "4" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = gemini_client(&server, Some("You are a calculator."));
    let orchestrator = Orchestrator::new(client);
    let result = orchestrator.chat("What is 2+2?").await.unwrap();

    assert_eq!(result.query, "What is 2+2?");
    assert_eq!(result.result, "4");
}

#[tokio::test]
async fn test_gemini_without_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/openai/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = gemini_client(&server, None);
    let err = client.generate(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert!(matches!(err, GatewayError::EmptyResponse));
}

#[tokio::test]
async fn test_ollama_chat_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.1:8b",
            "stream": false,
            "messages": [{ "role": "user", "content": "Hello" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1:8b",
            "created_at": "2023-08-04T19:22:45.499127Z",
            "message": { "role": "assistant", "content": "Hi there." },
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(Some(server.uri()), Some("llama3.1:8b".to_string()), None);
    let reply = client.generate(&[ChatMessage::user("Hello")]).await.unwrap();

    assert_eq!(reply, ChatMessage::assistant("Hi there."));
}

#[tokio::test]
async fn test_ollama_server_error_propagates_through_orchestrator() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = LlmConfig {
        llm_type: LlmType::Ollama,
        base_url: Some(server.uri()),
        ..LlmConfig::default()
    };
    let orchestrator = Orchestrator::new(new_client(&config).unwrap());
    let err = orchestrator.chat("Hello").await.unwrap_err();

    assert!(matches!(err, GatewayError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_unreachable_provider_is_http_error() {
    // Nothing listens on the discard port.
    let client = OllamaClient::new(Some("http://127.0.0.1:9".to_string()), None, None);
    let err = client.generate(&[ChatMessage::user("Hello")]).await.unwrap_err();

    assert!(matches!(err, GatewayError::Http(_)));
}
