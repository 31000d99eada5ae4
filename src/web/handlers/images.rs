// Image generation handlers — proxy to the Kie.ai task API.
//
// POST /api/generate-image          — start a task, return its id
// GET  /api/image-status/{task_id}  — poll a task
// GET  /api/available-models        — the fixed model catalog
//
// Generation is asynchronous on the provider side: the frontend polls the
// status endpoint until an image URL appears.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::imagegen::catalog::MODELS;
use crate::web::{api_error, AppState};

fn default_model() -> String {
    "nano-banana-pro".to_string()
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_output_format() -> String {
    "png".to_string()
}

#[derive(Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

#[derive(Serialize)]
pub struct GenerateImageResponse {
    pub task_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct TaskStatusResponse {
    pub task_id: String,
    pub status: String,
    pub image_url: Option<String>,
    pub message: String,
}

/// POST /api/generate-image — start an image generation task.
pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Response {
    if state.config.kie_api_key.is_empty() {
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "KIE_API_KEY not configured",
        );
    }

    match state
        .imagegen
        .create_task(
            &request.prompt,
            &request.model,
            &request.aspect_ratio,
            &request.output_format,
        )
        .await
    {
        Ok(task_id) => Json(GenerateImageResponse {
            task_id,
            status: "processing".to_string(),
            message: "Image generation started".to_string(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Image generation failed");
            upstream_error(&e)
        }
    }
}

/// GET /api/image-status/{task_id} — check a generation task.
pub async fn image_status(State(state): State<AppState>, Path(task_id): Path<String>) -> Response {
    if state.config.kie_api_key.is_empty() {
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "KIE_API_KEY not configured",
        );
    }

    match state.imagegen.task_status(&task_id).await {
        Ok(snapshot) => Json(TaskStatusResponse {
            task_id,
            message: format!("Task status: {}", snapshot.status),
            status: snapshot.status,
            image_url: snapshot.image_url,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, task_id = %task_id, "Status check failed");
            upstream_error(&e)
        }
    }
}

/// GET /api/available-models — list selectable image models.
pub async fn available_models() -> impl IntoResponse {
    Json(serde_json::json!({ "models": MODELS }))
}

/// Map an upstream failure to a gateway status: 504 for timeouts, 502
/// otherwise.
fn upstream_error(e: &anyhow::Error) -> Response {
    let timed_out = e
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<reqwest::Error>(), Some(re) if re.is_timeout()));

    if timed_out {
        api_error(StatusCode::GATEWAY_TIMEOUT, "Request timeout")
    } else {
        api_error(StatusCode::BAD_GATEWAY, &format!("{e:#}"))
    }
}
