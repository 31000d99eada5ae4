// Web server — Axum JSON API for the authoring frontend.
//
// All routes live under /api (plus /health for deploy probes). There is no
// auth: the API is a single-tenant backend sitting behind the frontend's
// origin, and CORS is the only gate. State is a bundle of Arcs threaded
// through every handler.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::traits::Database;
use crate::imagegen::client::KieClient;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<Config>,
    pub imagegen: Arc<KieClient>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, db: Arc<dyn Database>, port: u16, bind: &str) -> Result<()> {
    let imagegen = Arc::new(KieClient::new(
        &config.kie_api_base,
        config.kie_api_key.clone(),
    )?);

    let state = AppState {
        db,
        config: Arc::new(config),
        imagegen,
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Folio API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assemble the full route table. Public so tests can drive the router
/// in-process without binding a socket.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .route("/api/", get(root))
        .route(
            "/api/status",
            post(handlers::status::create_status_check).get(handlers::status::list_status_checks),
        )
        .route("/api/generate-image", post(handlers::images::generate_image))
        .route("/api/image-status/{task_id}", get(handlers::images::image_status))
        .route("/api/available-models", get(handlers::images::available_models))
        .route(
            "/api/chapters",
            post(handlers::chapters::create_chapter).get(handlers::chapters::list_chapters),
        )
        .route(
            "/api/chapters/{chapter_id}",
            get(handlers::chapters::get_chapter).delete(handlers::chapters::delete_chapter),
        )
        .route(
            "/api/chapters/{chapter_id}/topics/{topic_id}",
            put(handlers::topics::update_topic),
        )
        .route(
            "/api/chapters/{chapter_id}/topics/{topic_id}/hotspots",
            post(handlers::topics::add_hotspot),
        )
        .route(
            "/api/chapters/{chapter_id}/topics/{topic_id}/annotations",
            post(handlers::topics::add_annotation),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Deploy health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// API root — kept for frontend connectivity probes.
async fn root() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "message": "Hello World" }))
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
