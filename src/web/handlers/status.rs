// Status check handlers — client health pings.
//
// POST /api/status — record a ping
// GET  /api/status — list recorded pings (up to 1000)

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::models::{new_id, StatusCheck};
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// POST /api/status — record a client health ping.
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(input): Json<StatusCheckCreate>,
) -> Response {
    let check = StatusCheck {
        id: new_id(),
        client_name: input.client_name,
        timestamp: Utc::now().to_rfc3339(),
    };

    match state.db.insert_status_check(&check).await {
        Ok(()) => Json(check).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error recording status check");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /api/status — list recorded pings.
pub async fn list_status_checks(State(state): State<AppState>) -> Response {
    match state.db.list_status_checks(1000).await {
        Ok(checks) => Json(checks).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing status checks");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
