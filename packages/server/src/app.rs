use crate::shell;
use crate::sse_surface::{SseSurface, SurfaceEvent};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use livepad_common::Config;
use livepad_document::{load_fixture, ContentKind, Fixture};
use livepad_generator::{generator_for, GenerateRequest, GenerateResponse, Generator};
use livepad_preview::{BlobStore, CycleId, MessageOutcome, PreviewHost};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Header sent with every preview document
pub const PREVIEW_CSP: &str = "sandbox allow-scripts";

pub type SharedHost = PreviewHost<Arc<BlobStore>, SseSurface>;

pub struct AppState {
    pub host: Mutex<SharedHost>,
    pub store: Arc<BlobStore>,
    pub events: broadcast::Sender<SurfaceEvent>,
    pub generator: Arc<dyn Generator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        let store = Arc::new(BlobStore::new("/preview"));
        let surface = SseSurface::new();
        let events = surface.sender();
        Self {
            host: Mutex::new(PreviewHost::new(store.clone(), surface)),
            store,
            events,
            generator,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(generator_for(
            config.generate_endpoint.as_deref(),
            config.stub_delay(),
        ))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(shell_handler))
        .route("/api/events", get(events_handler))
        .route("/api/refresh", post(refresh_handler))
        .route("/api/message", post(message_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/fixtures", get(fixtures_handler))
        .route("/api/fixtures/:id", get(fixture_handler))
        .route("/preview/:id", get(preview_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shell_handler() -> Html<String> {
    Html(shell::page())
}

/// SSE stream of preview surface events
async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events.subscribe();
    tracing::info!("app shell connected");

    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    let sse_event = Event::default().event(event.name()).data(json);
                    return Some((Ok(sse_event), rx));
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("[SSE] Subscriber lagged by {} events", n);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("[SSE] Event channel closed");
                    return None;
                }
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub cycle: Option<CycleId>,
    pub kind: Option<ContentKind>,
    pub url: Option<String>,
    pub validation_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn refresh_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> impl IntoResponse {
    let result = state.host.lock().await.refresh(&request.code);

    match result {
        Ok(cycle) => {
            tracing::info!(cycle = %cycle.id, kind = %cycle.kind, "preview refreshed");
            if let Some(handshake) = cycle.handshake {
                let id = cycle.id;
                tokio::spawn(async move {
                    let outcome = handshake.await;
                    tracing::debug!(cycle = %id, outcome = ?outcome, "handshake finished");
                });
            }
            (
                StatusCode::OK,
                Json(RefreshResponse {
                    cycle: Some(cycle.id),
                    kind: Some(cycle.kind),
                    url: Some(cycle.resource.url),
                    validation_error: cycle.validation.map(|e| e.to_string()),
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!("Refresh failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RefreshResponse {
                    cycle: None,
                    kind: None,
                    url: None,
                    validation_error: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub cycle: Option<CycleId>,
    pub data: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub outcome: MessageOutcome,
}

/// Messages the shell received from the preview frame
async fn message_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let mut host = state.host.lock().await;
    let outcome = match request.cycle {
        Some(cycle) => host.handle_message_for(cycle, &request.data),
        None => host.handle_message(&request.data),
    };
    Json(MessageResponse { outcome })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

async fn generate_handler(
    State(state): State<Arc<AppState>>,
    request: Option<Json<GenerateRequest>>,
) -> Response {
    let prompt = request.map(|Json(request)| request.prompt).unwrap_or_default();
    match state.generator.generate(&prompt).await {
        Ok(code) => Json(GenerateResponse { code: Some(code) }).into_response(),
        Err(e) => {
            tracing::error!("Generation failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixtureResponse {
    pub id: String,
    pub description: String,
    pub code: String,
}

impl From<Fixture> for FixtureResponse {
    fn from(fixture: Fixture) -> Self {
        Self {
            id: fixture.id().to_string(),
            description: fixture.description().to_string(),
            code: fixture.source().to_string(),
        }
    }
}

async fn fixtures_handler() -> Json<Vec<FixtureResponse>> {
    Json(Fixture::ALL.into_iter().map(FixtureResponse::from).collect())
}

async fn fixture_handler(Path(id): Path<String>) -> Json<FixtureResponse> {
    Json(load_fixture(&id).into())
}

async fn preview_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Response {
    match state.store.get(id) {
        Some(document) => (
            [
                (header::CONTENT_TYPE, document.content_type),
                (header::CONTENT_SECURITY_POLICY, PREVIEW_CSP),
                (header::CACHE_CONTROL, "no-store"),
            ],
            document.body.to_string(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Preview not found").into_response(),
    }
}
