//! HTTP-level tests for the Gemini backend against a mock server.

use assignor_agent::backends::GeminiBackend;
use assignor_agent::{AgentBackend, AgentEvent, AgentProvider, ModelConfig};
use assignor_core::Message;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str) -> ModelConfig {
    ModelConfig {
        provider: AgentProvider::Gemini,
        model_id: "gemini-2.0-flash".to_string(),
        api_key: "test-key".to_string(),
        api_base_url: Some(base_url.to_string()),
        temperature: 0.7,
        max_output_tokens: 1024,
    }
}

async fn drain(mut rx: tokio::sync::mpsc::Receiver<AgentEvent>) -> Vec<AgentEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_gemini_success_yields_final_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "- q1\n- q2" }], "role": "model" }
            }]
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(config(&server.uri()));
    let sid = uuid::Uuid::new_v4();
    let rx = backend
        .converse("Planner", Some("plan"), &[Message::user("hi", sid)])
        .await
        .unwrap();

    let events = drain(rx).await;
    match &events[0] {
        AgentEvent::Text {
            author,
            text,
            is_final,
        } => {
            assert_eq!(author, "Planner");
            assert_eq!(text, "- q1\n- q2");
            assert!(is_final);
        }
        other => panic!("expected Text, got {other:?}"),
    }
    assert!(matches!(events.last(), Some(AgentEvent::Done)));
}

#[tokio::test]
async fn test_gemini_http_error_becomes_error_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(config(&server.uri()));
    let sid = uuid::Uuid::new_v4();
    let rx = backend
        .converse("Planner", None, &[Message::user("hi", sid)])
        .await
        .unwrap();

    let events = drain(rx).await;
    match &events[0] {
        AgentEvent::Error {
            message, detail, ..
        } => {
            assert!(message.contains("429"));
            assert_eq!(detail.as_deref(), Some("quota exhausted"));
        }
        other => panic!("expected Error, got {other:?}"),
    }
    // No final text: a runner consuming this stream reports no-final-response.
    assert!(!events
        .iter()
        .any(|e| matches!(e, AgentEvent::Text { is_final: true, .. })));
}

#[tokio::test]
async fn test_gemini_malformed_body_becomes_error_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(config(&server.uri()));
    let sid = uuid::Uuid::new_v4();
    let rx = backend
        .converse("Planner", None, &[Message::user("hi", sid)])
        .await
        .unwrap();

    let events = drain(rx).await;
    match &events[0] {
        AgentEvent::Error { message, .. } => {
            assert!(message.contains("missing candidate text"));
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_unreachable_host_is_transport_error() {
    let backend = GeminiBackend::new(config("http://127.0.0.1:1"));
    let sid = uuid::Uuid::new_v4();
    let result = backend
        .converse("Planner", None, &[Message::user("hi", sid)])
        .await;
    assert!(matches!(
        result,
        Err(assignor_core::AssignorError::Transport(_))
    ));
}
