//! End-to-end tests of the reqwest transport against a mockito server.

use mockito::{Matcher, Server, ServerGuard};
use openai_chat::{
    ChatClient, ChatClientBuilder, ChatCompletionOptions, ChatMessage, ClientConfig, Error,
    Model, TransportError,
};
use std::time::Duration;

const FIXTURE: &str = include_str!("fixtures/chat_completion_response.json");

/// Mock server plus a client pointed at `{server}/v1`.
struct MockServerFixture {
    server: ServerGuard,
}

impl MockServerFixture {
    async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    fn client(&self) -> ChatClient {
        self.builder().build().expect("client builds")
    }

    fn builder(&self) -> ChatClientBuilder {
        // Explicit config so nothing leaks in from the environment or keyring.
        let config = ClientConfig {
            api_key: Some("sk-test".into()),
            timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        };
        ChatClientBuilder::with_config(config).base_url(format!("{}/v1/", self.server.url()))
    }
}

fn opts() -> ChatCompletionOptions {
    ChatCompletionOptions::new(
        Model::GPT_3_5_TURBO,
        vec![
            ChatMessage::system("You are terse."),
            ChatMessage::user("Hello! How are you today?"),
        ],
    )
    .temperature(0.7)
}

#[tokio::test]
async fn test_post_chat_completions() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".into()))
        .match_body(Matcher::Json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "messages": [
                {"role": "system", "content": "You are terse."},
                {"role": "user", "content": "Hello! How are you today?"}
            ],
            "temperature": 0.7,
            "max_tokens": 512
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(FIXTURE)
        .expect(1)
        .create_async()
        .await;

    let resp = fixture
        .client()
        .chat_completion_default(&opts())
        .await
        .expect("chat completion succeeds");

    mock.assert_async().await;
    assert_eq!(resp.id, "chatcmpl-7QyqpwdfhqwajicIEznoc6Q47XAyW");
    assert_eq!(resp.choices.len(), 2);
    assert_eq!(resp.usage.total_tokens, 49);
}

#[tokio::test]
async fn test_organization_header() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .match_header("openai-organization", "org-42")
        .with_status(200)
        .with_body(FIXTURE)
        .create_async()
        .await;

    let client = fixture.builder().organization("org-42").build().unwrap();
    client.chat_completion_default(&opts()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_envelope_maps_to_status_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_header("retry-after", "20")
        .with_body(
            r#"{"error":{"message":"Rate limit reached for requests","type":"requests","code":"rate_limit_exceeded"}}"#,
        )
        .create_async()
        .await;

    let err = fixture
        .client()
        .chat_completion_default(&opts())
        .await
        .unwrap_err();

    match err {
        Error::Transport(TransportError::Status {
            status,
            ref message,
            ref error_type,
            ref code,
        }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached for requests");
            assert_eq!(error_type.as_deref(), Some("requests"));
            assert_eq!(code.as_deref(), Some("rate_limit_exceeded"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_server_error_without_envelope() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let err = fixture
        .client()
        .chat_completion_default(&opts())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Network transport error: HTTP 500: upstream exploded");
}

#[tokio::test]
async fn test_success_with_unexpected_shape() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let err = fixture
        .client()
        .chat_completion_default(&opts())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "{err:?}");
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let bad = ChatCompletionOptions::new(Model::GPT_4, Vec::new());
    let err = fixture.client().chat_completion_default(&bad).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Nothing listens on port 1.
    let config = ClientConfig {
        api_key: Some("sk-test".into()),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    let client = ChatClientBuilder::with_config(config)
        .base_url("http://127.0.0.1:1/v1")
        .build()
        .unwrap();

    let err = client.chat_completion_default(&opts()).await.unwrap_err();
    match err {
        Error::Transport(TransportError::Http(ref e)) => assert!(e.is_connect(), "{e:?}"),
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let mut fixture = MockServerFixture::new().await;
    let moved = fixture
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(307)
        .with_header("location", "/v2/chat/completions")
        .expect(1)
        .create_async()
        .await;
    let target = fixture
        .server
        .mock("POST", "/v2/chat/completions")
        .with_status(200)
        .with_body(FIXTURE)
        .expect(0)
        .create_async()
        .await;

    let err = fixture
        .client()
        .chat_completion_default(&opts())
        .await
        .unwrap_err();

    moved.assert_async().await;
    target.assert_async().await;
    match err {
        Error::Transport(TransportError::Status { status, .. }) => assert_eq!(status, 307),
        other => panic!("expected status error, got {other:?}"),
    }
}
