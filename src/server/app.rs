use axum::body::Body;
use axum::http::{header, request::Parts, HeaderValue, StatusCode};
use axum::response::Response;
use axum::{extract::FromRef, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::error::{handle_panic, ApiError};
use super::routes;
use crate::config::Settings;

const ALLOWED_HEADERS: &str = "Content-Type,Authorization";
const ALLOWED_METHODS: &str = "GET,PATCH,POST,DELETE,OPTIONS";

/// Everything handlers need, built once at startup.
#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub fn build_router(state: AppState, cors_prefix: &str) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quizzes_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(cors_prefix))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
}

// Any origin is allowed, but only for paths under `prefix`.
fn cors_layer(prefix: &str) -> CorsLayer {
    let prefix = prefix.to_owned();
    CorsLayer::new().allow_origin(AllowOrigin::predicate(
        move |_origin: &HeaderValue, parts: &Parts| parts.uri.path().starts_with(&prefix),
    ))
}

pub async fn run_server(pool: SqlitePool, settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.addr();
    let app = build_router(AppState::new(pool), &settings.cors_prefix);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).map_err(|error| {
        tracing::error!(%error, "Failed to encode metrics");
        ApiError::Internal
    })?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .map_err(|error| {
            tracing::error!(%error, "Failed to build metrics response");
            ApiError::Internal
        })
}
