use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::dashboard::response::{GroupsOverview, ToggleRequest};
use crate::dashboard::{ApiError, ApiResponse, DashboardState};

/// Groups reported by the bot plus the active-group map
async fn list_groups_handler(State(state): State<DashboardState>) -> Result<Json<ApiResponse<GroupsOverview>>, ApiError> {
    let config = state.web_config.load().await?;
    Ok(ApiResponse::ok(GroupsOverview {
        groups: state.status().groups,
        active_groups: config.active_groups,
    }))
}

async fn toggle_group_handler(
    State(state): State<DashboardState>,
    Path(group_id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    state.web_config.set_group_active(&group_id, payload.active).await?;
    info!(group_id = %group_id, active = payload.active, "Group activation changed");
    Ok(ApiResponse::ok(json!({ "groupId": group_id, "active": payload.active })))
}

pub fn router() -> Router<DashboardState> {
    Router::new()
        .route("/api/groups", get(list_groups_handler))
        .route("/api/groups/{id}/toggle", post(toggle_group_handler))
}
