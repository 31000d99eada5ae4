// Topic mutation handlers.
//
// PUT  /api/chapters/{id}/topics/{topic_id}             — partial update
// POST /api/chapters/{id}/topics/{topic_id}/hotspots    — append a hotspot
// POST /api/chapters/{id}/topics/{topic_id}/annotations — append an annotation
//
// Updates are patch-style: only the fields present in the body change, and
// a present hotspot/annotation list replaces the stored set wholesale.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::models::{Annotation, Hotspot, TopicPatch};
use crate::web::{api_error, AppState};

/// PUT /api/chapters/{chapter_id}/topics/{topic_id} — patch a topic.
pub async fn update_topic(
    State(state): State<AppState>,
    Path((chapter_id, topic_id)): Path<(String, String)>,
    Json(patch): Json<TopicPatch>,
) -> Response {
    match state.db.update_topic(&chapter_id, &topic_id, &patch).await {
        Ok(Some(topic)) => Json(serde_json::json!({
            "message": "Topic updated successfully",
            "topic": topic,
        }))
        .into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Topic not found"),
        Err(e) => {
            tracing::error!(error = %e, topic_id = %topic_id, "DB error updating topic");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// POST /api/chapters/{chapter_id}/topics/{topic_id}/hotspots — add a hotspot.
pub async fn add_hotspot(
    State(state): State<AppState>,
    Path((chapter_id, topic_id)): Path<(String, String)>,
    Json(hotspot): Json<Hotspot>,
) -> Response {
    match state.db.add_hotspot(&chapter_id, &topic_id, &hotspot).await {
        Ok(true) => Json(serde_json::json!({
            "message": "Hotspot added",
            "hotspot": hotspot,
        }))
        .into_response(),
        Ok(false) => api_error(StatusCode::NOT_FOUND, "Topic not found"),
        Err(e) => {
            tracing::error!(error = %e, topic_id = %topic_id, "DB error adding hotspot");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// POST /api/chapters/{chapter_id}/topics/{topic_id}/annotations — add an
/// annotation (arrow, box, text).
pub async fn add_annotation(
    State(state): State<AppState>,
    Path((chapter_id, topic_id)): Path<(String, String)>,
    Json(annotation): Json<Annotation>,
) -> Response {
    match state
        .db
        .add_annotation(&chapter_id, &topic_id, &annotation)
        .await
    {
        Ok(true) => Json(serde_json::json!({
            "message": "Annotation added",
            "annotation": annotation,
        }))
        .into_response(),
        Ok(false) => api_error(StatusCode::NOT_FOUND, "Topic not found"),
        Err(e) => {
            tracing::error!(error = %e, topic_id = %topic_id, "DB error adding annotation");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
