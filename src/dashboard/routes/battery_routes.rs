use axum::{extract::State, routing::get, Json, Router};

use crate::dashboard::{ApiResponse, DashboardState};
use crate::models::BatteryStats;

async fn battery_stats_handler(State(state): State<DashboardState>) -> Json<ApiResponse<BatteryStats>> {
    ApiResponse::ok(state.battery_stats())
}

pub fn router() -> Router<DashboardState> {
    Router::new().route("/api/battery/stats", get(battery_stats_handler))
}
