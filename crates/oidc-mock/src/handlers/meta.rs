//! Discovery, health and service-info endpoints.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::responses::{DiscoveryDocument, HealthResponse, ServiceEndpoints, ServiceInfo};
use crate::state::AppState;

/// `GET /.well-known/openid_configuration`
pub async fn openid_configuration(State(state): State<AppState>) -> Json<DiscoveryDocument> {
    let config = &state.config;

    Json(DiscoveryDocument {
        issuer: config.issuer(),
        authorization_endpoint: config.endpoint_url(&config.authorization_endpoint),
        token_endpoint: config.endpoint_url(&config.token_endpoint),
        userinfo_endpoint: config.endpoint_url(&config.userinfo_endpoint),
        jwks_uri: config.endpoint_url("/.well-known/jwks.json"),
        scopes_supported: config.scopes_supported.clone(),
        response_types_supported: vec!["code".to_string()],
        grant_types_supported: vec!["authorization_code".to_string()],
        subject_types_supported: vec!["public".to_string()],
        id_token_signing_alg_values_supported: vec!["RS256".to_string()],
        token_endpoint_auth_methods_supported: vec!["client_secret_basic".to_string()],
        acr_values_supported: config.acr_values_supported.clone(),
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// `GET /`
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let config = &state.config;

    Json(ServiceInfo {
        service: "OAuth OIDC Mock Service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        openid_configuration: config.endpoint_url("/.well-known/openid_configuration"),
        endpoints: ServiceEndpoints {
            authorize: config.authorization_endpoint.clone(),
            token: config.token_endpoint.clone(),
            userinfo: config.userinfo_endpoint.clone(),
            health: "/health".to_string(),
        },
        supported_scopes: config.scopes_supported.clone(),
        supported_acr_values: config.acr_values_supported.clone(),
    })
}
