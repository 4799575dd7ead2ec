use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OAuth protocol errors surfaced by the authorization, token and userinfo
/// endpoints.
///
/// Every variant renders as HTTP 400 with a JSON body of the shape
/// `{"error": "...", "error_description": "..."}`. There is no status-code
/// distinction between client misuse and expired-state conditions.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// Malformed or missing request parameters.
    #[error("invalid_request: {0}")]
    InvalidRequest(&'static str),

    /// Requested scope is not in the configured supported set.
    #[error("invalid_scope: {0}")]
    InvalidScope(&'static str),

    /// Client authentication failed on the token endpoint.
    #[error("invalid_client: {0}")]
    InvalidClient(&'static str),

    /// Bad, expired or already-redeemed code, or redirect-URI mismatch.
    #[error("invalid_grant: {0}")]
    InvalidGrant(&'static str),

    /// Grant type other than authorization_code.
    #[error("unsupported_grant_type: {0}")]
    UnsupportedGrantType(&'static str),

    /// Bad or expired bearer token on the userinfo endpoint.
    #[error("invalid_token: {0}")]
    InvalidToken(&'static str),
}

impl OAuthError {
    /// The wire-level error code for the JSON body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidScope(_) => "invalid_scope",
            Self::InvalidClient(_) => "invalid_client",
            Self::InvalidGrant(_) => "invalid_grant",
            Self::UnsupportedGrantType(_) => "unsupported_grant_type",
            Self::InvalidToken(_) => "invalid_token",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::InvalidRequest(d)
            | Self::InvalidScope(d)
            | Self::InvalidClient(d)
            | Self::InvalidGrant(d)
            | Self::UnsupportedGrantType(d)
            | Self::InvalidToken(d) => *d,
        }
    }
}

/// JSON error body returned for every protocol failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub error_description: String,
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error = self.code(), "rejecting request: {}", self);

        let body = ErrorBody {
            error: self.code().to_string(),
            error_description: self.description().to_string(),
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_protocol_names() {
        assert_eq!(OAuthError::InvalidRequest("x").code(), "invalid_request");
        assert_eq!(OAuthError::InvalidScope("x").code(), "invalid_scope");
        assert_eq!(OAuthError::InvalidClient("x").code(), "invalid_client");
        assert_eq!(OAuthError::InvalidGrant("x").code(), "invalid_grant");
        assert_eq!(
            OAuthError::UnsupportedGrantType("x").code(),
            "unsupported_grant_type"
        );
        assert_eq!(OAuthError::InvalidToken("x").code(), "invalid_token");
    }

    #[test]
    fn responses_use_status_400() {
        let response = OAuthError::InvalidGrant("bad code").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
