pub mod battery_routes;
pub mod command_routes;
pub mod donation_routes;
pub mod group_routes;
pub mod settings_routes;
pub mod status_routes;

use axum::Router;

use super::DashboardState;

/// All `/api` routes
pub fn api_router() -> Router<DashboardState> {
    Router::new()
        .merge(status_routes::router())
        .merge(group_routes::router())
        .merge(command_routes::router())
        .merge(settings_routes::router())
        .merge(battery_routes::router())
        .merge(donation_routes::router())
}
