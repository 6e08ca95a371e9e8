use axum::{extract::State, routing::get, Json, Router};

use crate::dashboard::{ApiError, ApiResponse, DashboardState};
use crate::models::{DashboardSettings, SettingsPatch};

async fn get_settings_handler(
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<DashboardSettings>>, ApiError> {
    Ok(ApiResponse::ok(state.web_config.load().await?.settings))
}

/// Merge the given fields into the stored settings
async fn update_settings_handler(
    State(state): State<DashboardState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<ApiResponse<DashboardSettings>>, ApiError> {
    Ok(ApiResponse::ok(state.web_config.update_settings(patch).await?))
}

pub fn router() -> Router<DashboardState> {
    Router::new().route("/api/settings", get(get_settings_handler).post(update_settings_handler))
}
