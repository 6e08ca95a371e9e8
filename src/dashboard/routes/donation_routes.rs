use axum::{extract::State, routing::get, Json, Router};

use crate::dashboard::{ApiError, ApiResponse, DashboardState};
use crate::models::{DonationInfo, DonationPatch};

async fn get_donation_handler(State(state): State<DashboardState>) -> Result<Json<ApiResponse<DonationInfo>>, ApiError> {
    Ok(ApiResponse::ok(state.web_config.load().await?.donation))
}

async fn update_donation_handler(
    State(state): State<DashboardState>,
    Json(patch): Json<DonationPatch>,
) -> Result<Json<ApiResponse<DonationInfo>>, ApiError> {
    Ok(ApiResponse::ok(state.web_config.update_donation(patch).await?))
}

pub fn router() -> Router<DashboardState> {
    Router::new().route("/api/donation", get(get_donation_handler).post(update_donation_handler))
}
