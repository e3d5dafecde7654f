use livepad_document::ContentKind;
use livepad_generator::{
    GenerateResponse, GenerationError, Generator, HttpGenerator, StubGenerator,
};
use livepad_server::app::{FixtureResponse, MessageResponse, RefreshResponse, PREVIEW_CSP};
use livepad_server::{router, AppState};
use livepad_preview::{CycleId, MessageOutcome};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_server() -> (SocketAddr, Arc<AppState>) {
    let state = Arc::new(AppState::new(Arc::new(StubGenerator::new(Duration::ZERO))));
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

async fn refresh(client: &reqwest::Client, addr: SocketAddr, code: &str) -> RefreshResponse {
    client
        .post(format!("http://{}/api/refresh", addr))
        .json(&json!({ "code": code }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn send_ready(client: &reqwest::Client, addr: SocketAddr, cycle: CycleId) -> MessageOutcome {
    client
        .post(format!("http://{}/api/message", addr))
        .json(&json!({ "cycle": cycle, "data": { "previewReady": true } }))
        .send()
        .await
        .unwrap()
        .json::<MessageResponse>()
        .await
        .unwrap()
        .outcome
}

#[tokio::test]
async fn test_shell_page_is_served() {
    let (addr, _) = spawn_server().await;
    let body = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("sandbox=\"allow-scripts\""));
    assert!(body.contains("/api/events"));
}

#[tokio::test]
async fn test_refresh_publishes_sandboxed_document() {
    let (addr, state) = spawn_server().await;
    let client = reqwest::Client::new();

    let first = refresh(&client, addr, "<p>one</p>").await;
    assert_eq!(first.kind, Some(ContentKind::HtmlFragment));
    let first_url = first.url.unwrap();

    let response = client
        .get(format!("http://{}{}", addr, first_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-security-policy"].to_str().unwrap(),
        PREVIEW_CSP
    );
    assert!(response.text().await.unwrap().contains("<p>one</p>"));

    let second = refresh(&client, addr, "run()").await;
    assert_eq!(second.kind, Some(ContentKind::ScriptSource));
    assert!(second.cycle > first.cycle);

    let stale = client
        .get(format!("http://{}{}", addr, first_url))
        .send()
        .await
        .unwrap();
    assert_eq!(stale.status(), 404);
    assert_eq!(state.store.live_count(), 1);
}

#[tokio::test]
async fn test_refresh_reports_validation_error() {
    let (addr, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let response = refresh(&client, addr, "/this/is/not/valid/js();").await;
    assert!(response.validation_error.is_some());

    let response = refresh(&client, addr, "const r = /abc/i; r.test('abc');").await;
    assert_eq!(response.validation_error, None);
}

#[tokio::test]
async fn test_ready_message_is_delivered_once_over_sse() {
    let (addr, state) = spawn_server().await;
    let client = reqwest::Client::new();
    let mut events = state.events.subscribe();

    let cycle = refresh(&client, addr, "console.log('hi')").await.cycle.unwrap();

    assert_eq!(send_ready(&client, addr, cycle).await, MessageOutcome::Delivered);
    assert_eq!(send_ready(&client, addr, cycle).await, MessageOutcome::Ignored);

    let mut posts = Vec::new();
    while let Ok(event) = events.try_recv() {
        if event.name() == "post" {
            posts.push(serde_json::to_value(&event).unwrap());
        }
    }
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["message"]["userCode"], "console.log('hi')");
}

#[tokio::test]
async fn test_unrelated_message_is_ignored() {
    let (addr, _) = spawn_server().await;
    let client = reqwest::Client::new();
    refresh(&client, addr, "run()").await;

    let response: MessageResponse = client
        .post(format!("http://{}/api/message", addr))
        .json(&json!({ "data": { "type": "resize" } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(response.outcome, MessageOutcome::Ignored);
}

#[tokio::test]
async fn test_fixture_lookup_falls_back_to_default() {
    let (addr, _) = spawn_server().await;
    let fixture: FixtureResponse = reqwest::get(format!("http://{}/api/fixtures/unknown", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fixture.id, "default");
    assert!(fixture.code.contains("Example: Counter"));
}

#[tokio::test]
async fn test_generate_endpoint_rejects_get() {
    let (addr, _) = spawn_server().await;
    let response = reqwest::get(format!("http://{}/api/generate", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn test_http_generator_against_stub_endpoint() {
    let (addr, _) = spawn_server().await;
    let generator = HttpGenerator::new(format!("http://{}/api/generate", addr));
    let code = generator.generate("Test").await.unwrap();
    assert!(code.contains("Test"));
    assert!(!code.contains('<'));
}

#[tokio::test]
async fn test_http_generator_reports_status() {
    let (addr, _) = spawn_server().await;
    let generator = HttpGenerator::new(format!("http://{}/api/missing", addr));
    let err = generator.generate("Test").await.unwrap_err();
    assert!(matches!(err, GenerationError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_generate_without_prompt_uses_empty_prompt() {
    let (addr, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/api/generate", addr);

    let empty_object = client.post(&url).json(&json!({})).send().await.unwrap();
    assert_eq!(empty_object.status(), 200);
    let body: GenerateResponse = empty_object.json().await.unwrap();
    assert!(body.code.is_some_and(|code| !code.is_empty()));

    let no_body = client.post(&url).send().await.unwrap();
    assert_eq!(no_body.status(), 200);
    let body: GenerateResponse = no_body.json().await.unwrap();
    assert!(body.code.is_some());
}
