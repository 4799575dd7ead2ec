use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        meta::{health, openid_configuration, service_info},
        oauth::{authorize, token, userinfo},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// The three protocol endpoints are mounted at the paths from configuration;
/// the metadata endpoints are fixed.
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/", get(service_info))
        .route(
            "/.well-known/openid_configuration",
            get(openid_configuration),
        )
        .route("/health", get(health))
        .route(&config.authorization_endpoint, get(authorize))
        .route(&config.token_endpoint, post(token))
        .route(&config.userinfo_endpoint, get(userinfo))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
