use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;

pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod utils;

use state::AppState;

/// Assembles the application from the public routes and `protected`, which
/// must already carry whatever layer puts `SessionClaims` into the request
pub fn app(state: AppState, protected: Router<AppState>) -> Router {
    routes::public()
        .merge(protected)
        .fallback(routes::fallback::not_found)
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
