//! Serde payload types for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Successful token-endpoint response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Claims payload returned by the userinfo endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoClaims {
    pub sub: String,
    pub domain: String,
    pub acr: String,
    pub amr: Vec<String>,
    pub given_name: String,
    pub family_name: String,
    pub name: String,
    pub serial_number: String,
    pub eips: String,
}

/// OIDC discovery document served at `/.well-known/openid_configuration`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub jwks_uri: String,
    pub scopes_supported: Vec<String>,
    pub response_types_supported: Vec<String>,
    pub grant_types_supported: Vec<String>,
    pub subject_types_supported: Vec<String>,
    pub id_token_signing_alg_values_supported: Vec<String>,
    pub token_endpoint_auth_methods_supported: Vec<String>,
    pub acr_values_supported: Vec<String>,
}

/// Service summary served at the root path.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub openid_configuration: String,
    pub endpoints: ServiceEndpoints,
    pub supported_scopes: Vec<String>,
    pub supported_acr_values: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    pub authorize: String,
    pub token: String,
    pub userinfo: String,
    pub health: String,
}

/// Health-check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
