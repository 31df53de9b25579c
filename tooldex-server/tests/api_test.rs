// tooldex-server/tests/api_test.rs
// Endpoint integration tests: router driven in-process, upstreams mocked.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Json;
use axum::body::Body;
use axum::routing::post;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use shared::models::ConversationMessage;
use tooldex_server::analytics::AnalyticsLog;
use tooldex_server::api::create_router;
use tooldex_server::assistant::{BackendError, FALLBACK_REPLY, ModelBackend};
use tooldex_server::state::AppState;

/// Scripted model backend: returns a fixed outcome and counts calls
struct ScriptedBackend {
    calls: Arc<AtomicUsize>,
    reply: ScriptedReply,
}

#[derive(Clone)]
enum ScriptedReply {
    Text(&'static str),
    Empty,
    Fail,
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(&self, _messages: &[ConversationMessage]) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            ScriptedReply::Text(t) => Ok((*t).to_string()),
            ScriptedReply::Empty => Ok(String::new()),
            ScriptedReply::Fail => Err(BackendError::UpstreamStatus {
                status: 503,
                body: "model unavailable".into(),
            }),
        }
    }
}

struct TestApp {
    state: AppState,
    _analytics_dir: TempDir,
}

fn test_app(cms_url: &str, assistant: Option<Arc<dyn ModelBackend>>) -> TestApp {
    let analytics_dir = TempDir::new().unwrap();
    let state = AppState {
        http: reqwest::Client::new(),
        cms_graphql_url: cms_url.to_string(),
        assistant,
        analytics: AnalyticsLog::new(analytics_dir.path()).unwrap(),
    };
    TestApp {
        state,
        _analytics_dir: analytics_dir,
    }
}

fn scripted(reply: ScriptedReply) -> (Arc<dyn ModelBackend>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = Arc::new(ScriptedBackend {
        calls: calls.clone(),
        reply,
    });
    (backend, calls)
}

async fn post_json(
    state: AppState,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

/// Spawn a throwaway CMS double that echoes the received body with the
/// given status code; returns its URL.
async fn spawn_cms_echo(status: StatusCode) -> String {
    let app = axum::Router::new().route(
        "/graphql",
        post(move |Json(body): Json<serde_json::Value>| async move { (status, Json(body)) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/graphql")
}

// ==================== Health ====================

#[tokio::test]
async fn test_health_check() {
    let app = test_app("http://127.0.0.1:1/graphql", None);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = create_router(app.state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["service"], "tooldex-server");
}

// ==================== Chat ====================

#[tokio::test]
async fn test_chat_relays_backend_text() {
    let (backend, calls) = scripted(ScriptedReply::Text("**Tool:** ChatGPT"));
    let app = test_app("http://127.0.0.1:1/graphql", Some(backend));

    let (status, body) = post_json(
        app.state,
        "/api/chat",
        serde_json::json!({"messages": [{"role": "user", "content": "chatbots?"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "**Tool:** ChatGPT");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_chat_accepts_legacy_history_shape() {
    let (backend, _) = scripted(ScriptedReply::Text("sure"));
    let app = test_app("http://127.0.0.1:1/graphql", Some(backend));

    let (status, body) = post_json(
        app.state,
        "/api/chat",
        serde_json::json!({
            "history": [{"role": "assistant", "content": "hi"}],
            "message": "any writing tools?"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "sure");
}

#[tokio::test]
async fn test_chat_without_message_is_rejected_before_upstream() {
    let (backend, calls) = scripted(ScriptedReply::Text("never sent"));
    let app = test_app("http://127.0.0.1:1/graphql", Some(backend));

    let (status, body) = post_json(app.state, "/api/chat", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));
    // The upstream model was never called
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_empty_extraction_yields_fallback_with_200() {
    let (backend, _) = scripted(ScriptedReply::Empty);
    let app = test_app("http://127.0.0.1:1/graphql", Some(backend));

    let (status, body) = post_json(
        app.state,
        "/api/chat",
        serde_json::json!({"messages": [{"role": "user", "content": "hello"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], FALLBACK_REPLY);
}

#[tokio::test]
async fn test_chat_upstream_failure_is_generic_500() {
    let (backend, _) = scripted(ScriptedReply::Fail);
    let app = test_app("http://127.0.0.1:1/graphql", Some(backend));

    let (status, body) = post_json(
        app.state,
        "/api/chat",
        serde_json::json!({"messages": [{"role": "user", "content": "hello"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Upstream detail must not leak
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("model unavailable"));
    assert!(!message.contains("503"));
}

#[tokio::test]
async fn test_chat_without_configured_backend_is_500() {
    let app = test_app("http://127.0.0.1:1/graphql", None);

    let (status, _) = post_json(
        app.state,
        "/api/chat",
        serde_json::json!({"messages": [{"role": "user", "content": "hello"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ==================== GraphQL proxy ====================

#[tokio::test]
async fn test_proxy_passes_body_and_status_through() {
    let cms_url = spawn_cms_echo(StatusCode::OK).await;
    let app = test_app(&cms_url, None);

    let (status, body) = post_json(
        app.state,
        "/api/graphql",
        serde_json::json!({"query": "query ToolListing { posts(first: 21) { nodes { id } } }"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // The echo double hands our body straight back
    assert!(
        body["query"]
            .as_str()
            .unwrap()
            .contains("posts(first: 21)")
    );
}

#[tokio::test]
async fn test_proxy_preserves_upstream_error_status() {
    let cms_url = spawn_cms_echo(StatusCode::BAD_GATEWAY).await;
    let app = test_app(&cms_url, None);

    let (status, body) = post_json(
        app.state,
        "/api/graphql",
        serde_json::json!({"query": "{ posts { nodes { id } } }"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["query"], "{ posts { nodes { id } } }");
}

#[tokio::test]
async fn test_proxy_unreachable_backend_is_generic_500() {
    // Port 1 is never listening
    let app = test_app("http://127.0.0.1:1/graphql", None);

    let (status, body) = post_json(
        app.state,
        "/api/graphql",
        serde_json::json!({"query": "{ posts { nodes { id } } }"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// ==================== Analytics ====================

#[tokio::test]
async fn test_analytics_search_always_acks() {
    let app = test_app("http://127.0.0.1:1/graphql", None);
    let dir = app._analytics_dir.path().to_path_buf();

    let (status, body) = post_json(
        app.state,
        "/api/analytics/search",
        serde_json::json!({
            "searchTerm": "chatgpt",
            "timestamp": "2024-05-01T12:00:00Z",
            "sessionId": "s1"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    // Background writer flushes within its flush interval; poll briefly.
    let path = dir.join("search.jsonl");
    for _ in 0..50 {
        if std::fs::read_to_string(&path)
            .map(|c| c.contains("chatgpt"))
            .unwrap_or(false)
        {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("search event was not flushed to {path:?}");
}

#[tokio::test]
async fn test_analytics_chat_always_acks() {
    let app = test_app("http://127.0.0.1:1/graphql", None);

    let (status, body) = post_json(
        app.state,
        "/api/analytics/chat",
        serde_json::json!({
            "messages": [{"role": "user", "content": "hi"}],
            "timestamp": "2024-05-01T12:00:00Z",
            "sessionId": "s2"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}
