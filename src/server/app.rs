use axum::{extract::DefaultBodyLimit, middleware::from_fn_with_state, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::api::{api_routes, device_routes};

use super::{api_key_auth, AppState};

pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.settings.server.body_limit;

    // Device directory changes require the API key when one is configured
    let devices = device_routes().route_layer(from_fn_with_state(state.clone(), api_key_auth));

    Router::new()
        .merge(api_routes())
        .nest("/api/v1/devices", devices)
        // Add middleware
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Add state
        .with_state(state)
}
