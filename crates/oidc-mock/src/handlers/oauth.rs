//! The three protocol operations: authorize, token and userinfo.

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use url::Url;

use crate::error::OAuthError;
use crate::responses::{TokenResponse, UserInfoClaims};
use crate::state::AppState;
use crate::store::{generate_access_token, generate_auth_code, TOKEN_TTL_SECS};

/// Query parameters for the authorization endpoint. Absent parameters
/// deserialize as empty strings; `prompt` and `ui_locales` are accepted but
/// ignored.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AuthorizeRequest {
    pub response_type: String,
    pub client_id: String,
    pub state: String,
    pub redirect_uri: String,
    pub scope: String,
    pub prompt: String,
    pub acr_values: String,
    pub ui_locales: String,
}

/// Form fields for the token endpoint.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TokenRequest {
    pub grant_type: String,
    pub redirect_uri: String,
    pub code: String,
}

/// `GET <authorize-path>` - validates the request against the configured
/// allow-lists, mints an authorization code and redirects back to the client.
pub async fn authorize(
    State(state): State<AppState>,
    Query(req): Query<AuthorizeRequest>,
) -> Result<Response, OAuthError> {
    if req.response_type != "code" {
        return Err(OAuthError::InvalidRequest("response_type must be 'code'"));
    }
    if req.client_id.is_empty() {
        return Err(OAuthError::InvalidRequest("client_id is required"));
    }
    if req.redirect_uri.is_empty() {
        return Err(OAuthError::InvalidRequest("redirect_uri is required"));
    }
    if !state.config.scopes_supported.iter().any(|s| *s == req.scope) {
        return Err(OAuthError::InvalidScope("Invalid scope"));
    }
    if !state
        .config
        .acr_values_supported
        .iter()
        .any(|v| *v == req.acr_values)
    {
        return Err(OAuthError::InvalidRequest("Invalid acr_values"));
    }

    let code = generate_auth_code();
    state
        .store
        .put_auth_code(
            &code,
            &req.client_id,
            &req.redirect_uri,
            &req.scope,
            &req.acr_values,
        )
        .await;

    tracing::info!(client_id = %req.client_id, "issued authorization code");

    let mut redirect = Url::parse(&req.redirect_uri)
        .map_err(|_| OAuthError::InvalidRequest("Invalid redirect_uri"))?;
    set_query_param(&mut redirect, "code", &code);
    if !req.state.is_empty() {
        set_query_param(&mut redirect, "state", &req.state);
    }

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, redirect.to_string())],
    )
        .into_response())
}

/// Sets a query parameter, replacing any existing value for the same name.
fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, val)| (key.into_owned(), val.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (key, val) in &retained {
        pairs.append_pair(key, val);
    }
    pairs.append_pair(name, value);
}

/// `POST <token-path>` - authenticates the client, redeems the authorization
/// code and mints an access token.
pub async fn token(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Response, OAuthError> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let Some(credentials) = auth.strip_prefix("Basic ") else {
        return Err(OAuthError::InvalidClient("Basic authentication required"));
    };
    if credentials != state.config.basic_auth_value {
        return Err(OAuthError::InvalidClient("Invalid client credentials"));
    }

    let Form(req) = form.map_err(|_| OAuthError::InvalidRequest("Invalid form data"))?;

    if req.grant_type != "authorization_code" {
        return Err(OAuthError::UnsupportedGrantType(
            "Only authorization_code grant type is supported",
        ));
    }

    // Redemption is atomic: of two requests racing on the same code, exactly
    // one gets the entry.
    let Some(auth_code) = state.store.take_auth_code(&req.code).await else {
        tracing::debug!("rejected invalid or expired authorization code");
        return Err(OAuthError::InvalidGrant(
            "Invalid or expired authorization code",
        ));
    };

    // The code is consumed before this check; a mismatched redirect URI
    // still burns it, and a retry with the correct URI fails.
    if req.redirect_uri != auth_code.redirect_uri {
        return Err(OAuthError::InvalidGrant("Redirect URI mismatch"));
    }

    let access_token = generate_access_token();
    state
        .store
        .put_access_token(&access_token, &auth_code.acr_value)
        .await;

    tracing::info!(client_id = %auth_code.client_id, "issued access token");

    let body = TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: TOKEN_TTL_SECS,
    };

    Ok((
        [
            (header::CACHE_CONTROL, "no-store"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
        .into_response())
}

/// `GET <userinfo-path>` - validates the bearer token and projects it to a
/// synthetic claims payload.
pub async fn userinfo(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserInfoClaims>, OAuthError> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let Some(token) = auth.strip_prefix("Bearer ") else {
        return Err(OAuthError::InvalidToken("Bearer token required"));
    };

    let Some(access_token) = state.store.get_access_token(token).await else {
        return Err(OAuthError::InvalidToken("Invalid or expired access token"));
    };

    Ok(Json(state.config.profiles.claims_for(&access_token.acr_value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_query_param_appends_to_bare_url() {
        let mut url = Url::parse("https://client.example.com/cb").unwrap();
        set_query_param(&mut url, "code", "abc");
        assert_eq!(url.as_str(), "https://client.example.com/cb?code=abc");
    }

    #[test]
    fn set_query_param_overwrites_existing_value() {
        let mut url = Url::parse("https://client.example.com/cb?code=old&keep=1").unwrap();
        set_query_param(&mut url, "code", "new");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("keep".to_string(), "1".to_string())));
        assert!(pairs.contains(&("code".to_string(), "new".to_string())));
        assert_eq!(pairs.len(), 2);
    }
}
