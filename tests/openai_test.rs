//! Tests for the OpenAI chat-completions client against a mock server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tetoegen::TetoegenError;
use tetoegen::providers::{CompletionProvider, OpenAiClient};
use tetoegen::request::tip_request;
use tetoegen::types::{ChatMessage, CompletionRequest};
use tetoegen::PersonalityType;

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn simple_request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4".to_string(),
        messages: vec![ChatMessage::user("hello")],
        max_tokens: 10,
        temperature: 0.5,
    }
}

#[tokio::test]
async fn complete_returns_first_choice_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "gpt-4", "max_tokens": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("hi there")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("test-key", mock_server.uri());
    let content = client.complete(&simple_request()).await.unwrap();
    assert_eq!(content, "hi there");
}

#[tokio::test]
async fn tip_request_is_text_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "max_tokens": 800,
            "messages": [{"role": "user"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("test-key", mock_server.uri());
    let request = tip_request(PersonalityType::EgenMale, "gpt-4");
    client.complete(&request).await.unwrap();
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad key"})))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("wrong", mock_server.uri());
    let err = client.complete(&simple_request()).await.unwrap_err();
    assert!(matches!(err, TetoegenError::AuthenticationFailed));
    assert!(!err.is_malformed_response());
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("test-key", mock_server.uri());
    let err = client.complete(&simple_request()).await.unwrap_err();
    match err {
        TetoegenError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_envelope_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("test-key", mock_server.uri());
    let err = client.complete(&simple_request()).await.unwrap_err();
    assert!(err.is_malformed_response(), "got {err:?}");
}

#[tokio::test]
async fn empty_choices_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("test-key", mock_server.uri());
    let err = client.complete(&simple_request()).await.unwrap_err();
    assert!(matches!(err, TetoegenError::EmptyResponse));
}

#[tokio::test]
async fn unreachable_upstream_is_http_error() {
    // nothing listens on port 9 (discard) on a test host
    let client = OpenAiClient::with_base_url("test-key", "http://127.0.0.1:9");
    let err = client.complete(&simple_request()).await.unwrap_err();
    assert!(matches!(err, TetoegenError::Http(_)));
}

#[test]
fn provider_name() {
    let client = OpenAiClient::new("k");
    assert_eq!(CompletionProvider::name(&client), "openai");
}
