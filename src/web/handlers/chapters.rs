// Chapter handlers.
//
// POST   /api/chapters      — segment raw content and persist the result
// GET    /api/chapters      — list (up to 100, insertion order)
// GET    /api/chapters/{id} — single chapter with assembled subtree
// DELETE /api/chapters/{id} — cascade delete
//
// Creation is where the segmenter runs: the request carries the raw prose,
// the response carries the chapter with its derived topics and hotspots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::models::{new_id, Chapter};
use crate::segmenter;
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct ChapterCreate {
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw content to be segmented into topics
    pub content: String,
}

/// POST /api/chapters — create a chapter from raw content.
pub async fn create_chapter(
    State(state): State<AppState>,
    Json(input): Json<ChapterCreate>,
) -> Response {
    let topics = segmenter::segment(&input.content);

    let chapter = Chapter {
        id: new_id(),
        title: input.title,
        subject: input.subject,
        description: input.description,
        topics,
        created_at: Utc::now().to_rfc3339(),
    };

    match state.db.insert_chapter(&chapter).await {
        Ok(()) => Json(chapter).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error creating chapter");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /api/chapters — list stored chapters.
pub async fn list_chapters(State(state): State<AppState>) -> Response {
    match state.db.list_chapters(100).await {
        Ok(chapters) => Json(chapters).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing chapters");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /api/chapters/{chapter_id} — single chapter.
pub async fn get_chapter(
    State(state): State<AppState>,
    Path(chapter_id): Path<String>,
) -> Response {
    match state.db.get_chapter(&chapter_id).await {
        Ok(Some(chapter)) => Json(chapter).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Chapter not found"),
        Err(e) => {
            tracing::error!(error = %e, chapter_id = %chapter_id, "DB error fetching chapter");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// DELETE /api/chapters/{chapter_id} — delete a chapter and its subtree.
pub async fn delete_chapter(
    State(state): State<AppState>,
    Path(chapter_id): Path<String>,
) -> Response {
    match state.db.delete_chapter(&chapter_id).await {
        Ok(true) => Json(serde_json::json!({ "message": "Chapter deleted" })).into_response(),
        Ok(false) => api_error(StatusCode::NOT_FOUND, "Chapter not found"),
        Err(e) => {
            tracing::error!(error = %e, chapter_id = %chapter_id, "DB error deleting chapter");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
