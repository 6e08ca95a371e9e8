use axum::{extract::State, routing::get, Json, Router};

use crate::dashboard::{ApiError, ApiResponse, DashboardState};
use crate::models::{BotStatus, StatusUpdate};

async fn get_status_handler(State(state): State<DashboardState>) -> Json<ApiResponse<BotStatus>> {
    ApiResponse::ok(state.status())
}

/// Status pushed by a bot running in another process
async fn put_status_handler(
    State(state): State<DashboardState>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<ApiResponse<BotStatus>>, ApiError> {
    Ok(ApiResponse::ok(state.update_status(update)))
}

pub fn router() -> Router<DashboardState> {
    Router::new().route("/api/status", get(get_status_handler).put(put_status_handler))
}
