use std::sync::{Arc, Mutex};

use musechat_api::{ApiError, CompletionClient, OpenRouterClient};
use musechat_models::{ApiMessage, Role};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenRouterClient {
    OpenRouterClient::with_base_url("test-api-key".to_string(), server.uri())
}

fn user_message(content: &str) -> Vec<ApiMessage> {
    vec![ApiMessage {
        role: Role::User,
        content: content.to_string(),
    }]
}

#[tokio::test]
async fn complete_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_partial_json(json!({
            "model": "deepseek/deepseek-chat:free",
            "messages": [{"role": "user", "content": "hello"}],
            "max_tokens": 2048,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "hi"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = client_for(&server)
        .complete(&user_message("hello"), "deepseek/deepseek-chat:free")
        .await
        .unwrap();

    assert_eq!(completion.content, "hi");
    assert_eq!(completion.usage.unwrap().total_tokens, 12);
}

#[tokio::test]
async fn complete_sends_referer_and_title_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("HTTP-Referer", "https://musechat.local"))
        .and(header("X-Title", "MuseChat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)
        .referer("https://musechat.local")
        .app_title("MuseChat");

    let completion = client
        .complete(&user_message("hello"), "deepseek/deepseek-chat:free")
        .await
        .unwrap();
    assert_eq!(completion.content, "ok");
}

#[tokio::test]
async fn non_2xx_surfaces_server_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "rate limited"}
            })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&user_message("hello"), "deepseek/deepseek-chat:free")
        .await
        .unwrap_err();

    match &err {
        ApiError::Http { status, message } => {
            assert_eq!(*status, 429);
            assert_eq!(message, "rate limited");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "rate limited");
}

#[tokio::test]
async fn non_2xx_without_json_body_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&user_message("hello"), "deepseek/deepseek-chat:free")
        .await
        .unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 500);
            assert!(message.starts_with("HTTP 500"), "message was {:?}", message);
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&user_message("hello"), "deepseek/deepseek-chat:free")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn empty_choices_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&user_message("hello"), "deepseek/deepseek-chat:free")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NoChoices), "got {:?}", err);
}

#[tokio::test]
async fn streaming_delivers_fragments_until_done_marker() {
    let server = MockServer::start().await;

    let sse_body = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n\n",
        "data: {not json}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n\n",
        "data: [DONE]\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"never\"}}]}\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body, "text/event-stream"),
        )
        .mount(&server)
        .await;

    let chunks: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = chunks.clone();

    let completion = client_for(&server)
        .complete_streaming(
            &user_message("hello"),
            "deepseek/deepseek-chat:free",
            Box::new(move |chunk| sink.lock().unwrap().push(chunk.to_string())),
        )
        .await
        .unwrap();

    assert_eq!(completion.content, "Hello");
    assert_eq!(*chunks.lock().unwrap(), vec!["He".to_string(), "llo".to_string()]);
}

#[tokio::test]
async fn streaming_errors_on_non_2xx_before_reading_stream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "missing credentials"}
            })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete_streaming(
            &user_message("hello"),
            "deepseek/deepseek-chat:free",
            Box::new(|_| {}),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "missing credentials");
}
