//! HTTP server for the interactive timeline viewer.
//!
//! This module provides an HTTP server that:
//! - Serves the viewer page with the person dropdown at GET /
//! - Exposes timelines as JSON and SVG under /api
//! - Accepts replacement CSV data via POST /api/upload
//!
//! # Architecture
//!
//! ```text
//! Browser ──→ GET / ──→ viewer page ──→ GET /api/timeline/:id/svg
//!                │
//!                └──→ POST /api/upload ──→ [Dataset swap]
//! ```

use crate::config::Config;
use crate::dataset::Dataset;
use crate::render::{chart_page, viewer_page, TimelineRenderer};
use crate::timeline::{
    build_timeline, summarize, DisplayWindow, PersonTimeline, Segment, TimelineSummary,
};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind to (0 for random)
    pub port: u16,
    /// Viewer configuration (window anchor, chart appearance)
    pub config: Config,
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(port: u16, config: Config) -> Self {
        Self { port, config }
    }
}

/// Shared server state
pub struct ServerState {
    /// Currently loaded dataset; replaced wholesale on upload
    dataset: RwLock<Dataset>,
    /// Renderer reflecting the chart configuration
    renderer: TimelineRenderer,
    /// Hour of day display windows open at
    day_start_hour: u32,
}

impl ServerState {
    /// Create new server state around an already loaded dataset
    pub fn new(config: &ServerConfig, dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
            renderer: config.config.chart.renderer(),
            day_start_hour: config.config.day_start_hour,
        }
    }

    /// Build the timeline for one person from the current dataset.
    async fn timeline_for(
        &self,
        person_id: &str,
    ) -> Result<PersonTimeline, (StatusCode, Json<ErrorResponse>)> {
        let dataset = self.dataset.read().await;
        let records = dataset.schedule(person_id).ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Unknown person: {person_id}"),
                    code: "UNKNOWN_PERSON".to_string(),
                }),
            )
        })?;

        build_timeline(person_id, records, self.day_start_hour).map_err(|e| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: format!("Cannot lay out schedule: {e}"),
                    code: "INVALID_SCHEDULE".to_string(),
                }),
            )
        })
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub person_count: usize,
}

/// People listing response
#[derive(Serialize)]
pub struct PeopleResponse {
    pub dataset_id: Uuid,
    pub people: Vec<String>,
}

/// Timeline response with its summary attached
#[derive(Serialize)]
pub struct TimelineResponse {
    pub person_id: String,
    pub window: DisplayWindow,
    pub segments: Vec<Segment>,
    pub summary: TimelineSummary,
}

/// Response from the upload endpoint
#[derive(Serialize)]
pub struct UploadResponse {
    pub dataset_id: Uuid,
    pub person_count: usize,
    pub record_count: usize,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// GET /
async fn index(State(state): State<Arc<ServerState>>) -> Html<String> {
    let dataset = state.dataset.read().await;
    let people = dataset.people().to_vec();
    drop(dataset);

    let selected = people.first().map(String::as_str);
    Html(viewer_page(&people, selected))
}

/// GET /health
async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let dataset = state.dataset.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        person_count: dataset.person_count(),
    })
}

/// GET /api/people
async fn people(State(state): State<Arc<ServerState>>) -> Json<PeopleResponse> {
    let dataset = state.dataset.read().await;
    Json(PeopleResponse {
        dataset_id: dataset.dataset_id,
        people: dataset.people().to_vec(),
    })
}

/// GET /api/timeline/:person_id
async fn timeline_json(
    State(state): State<Arc<ServerState>>,
    Path(person_id): Path<String>,
) -> Result<Json<TimelineResponse>, (StatusCode, Json<ErrorResponse>)> {
    let timeline = state.timeline_for(&person_id).await?;
    let summary = summarize(&timeline);
    Ok(Json(TimelineResponse {
        person_id: timeline.person_id,
        window: timeline.window,
        segments: timeline.segments,
        summary,
    }))
}

/// GET /api/timeline/:person_id/svg
async fn timeline_svg(
    State(state): State<Arc<ServerState>>,
    Path(person_id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let timeline = state.timeline_for(&person_id).await?;
    let svg = state.renderer.render_svg(&timeline);
    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
        svg,
    )
        .into_response())
}

/// GET /chart/:person_id
///
/// A standalone HTML page for one person, suitable for direct linking.
async fn chart(
    State(state): State<Arc<ServerState>>,
    Path(person_id): Path<String>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let timeline = state.timeline_for(&person_id).await?;
    let summary = summarize(&timeline);
    Ok(Html(chart_page(&timeline, &summary, &state.renderer)))
}

/// POST /api/upload
///
/// Accepts CSV text and replaces the dataset. A rejected upload leaves the
/// current dataset untouched.
async fn upload(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> Result<Json<UploadResponse>, (StatusCode, Json<ErrorResponse>)> {
    let dataset = Dataset::from_csv_str(&body).map_err(|e| {
        tracing::warn!("Rejected upload: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid CSV: {e}"),
                code: "INVALID_CSV".to_string(),
            }),
        )
    })?;

    let response = UploadResponse {
        dataset_id: dataset.dataset_id,
        person_count: dataset.person_count(),
        record_count: dataset.record_count(),
    };
    tracing::info!(
        "Dataset replaced: {} people, {} records",
        response.person_count,
        response.record_count
    );

    *state.dataset.write().await = dataset;
    Ok(Json(response))
}

/// Run the HTTP server
pub async fn run(
    config: ServerConfig,
    dataset: Dataset,
) -> anyhow::Result<(SocketAddr, tokio::sync::oneshot::Sender<()>)> {
    let state = Arc::new(ServerState::new(&config, dataset));

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/people", get(people))
        .route("/api/timeline/:person_id", get(timeline_json))
        .route("/api/timeline/:person_id/svg", get(timeline_svg))
        .route("/chart/:person_id", get(chart))
        .route("/api/upload", post(upload))
        .layer(
            CorsLayer::new()
                .allow_origin([
                    HeaderValue::from_static("http://localhost"),
                    HeaderValue::from_static("http://127.0.0.1"),
                ])
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Timeline viewer listening on http://{}", actual_addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Server shutdown signal received");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_addr, shutdown_tx))
}
