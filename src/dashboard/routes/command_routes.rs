use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::dashboard::{ApiError, ApiResponse, DashboardState};
use crate::models::{CommandUpdate, CustomCommand, NewCommand};

async fn list_commands_handler(
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<Vec<CustomCommand>>>, ApiError> {
    let config = state.web_config.load().await?;
    Ok(ApiResponse::ok(config.custom_commands))
}

async fn create_command_handler(
    State(state): State<DashboardState>,
    Json(payload): Json<NewCommand>,
) -> Result<(StatusCode, Json<ApiResponse<CustomCommand>>), ApiError> {
    let command = state.web_config.add_command(payload).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(command)))
}

async fn update_command_handler(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
    Json(payload): Json<CommandUpdate>,
) -> Result<Json<ApiResponse<CustomCommand>>, ApiError> {
    Ok(ApiResponse::ok(state.web_config.update_command(&id, payload).await?))
}

async fn delete_command_handler(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CustomCommand>>, ApiError> {
    Ok(ApiResponse::ok(state.web_config.delete_command(&id).await?))
}

/// Usage reported by a bot running in another process
async fn record_usage_handler(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CustomCommand>>, ApiError> {
    Ok(ApiResponse::ok(state.web_config.record_usage(&id).await?))
}

pub fn router() -> Router<DashboardState> {
    Router::new()
        .route("/api/commands", get(list_commands_handler).post(create_command_handler))
        .route(
            "/api/commands/{id}",
            put(update_command_handler).delete(delete_command_handler),
        )
        .route("/api/commands/{id}/usage", post(record_usage_handler))
}
