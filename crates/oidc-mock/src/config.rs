use std::env;

use crate::profile::{IdentityProfiles, ACR_MOBILE_ID, ACR_SMART_CARD};

/// Application configuration loaded once at startup from environment
/// variables. Injected into components at construction; never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public hostname clients use to reach the service (default: "localhost:8080")
    pub host: String,
    /// URL scheme for advertised endpoint URLs (default: "http")
    pub protocol: String,
    /// Expected base64 `client:secret` value for token-endpoint Basic auth
    pub basic_auth_value: String,
    /// Path of the authorization endpoint (default: "/authorize")
    pub authorization_endpoint: String,
    /// Path of the token endpoint (default: "/token")
    pub token_endpoint: String,
    /// Path of the userinfo endpoint (default: "/userinfo")
    pub userinfo_endpoint: String,
    /// Scopes accepted by the authorization endpoint
    pub scopes_supported: Vec<String>,
    /// acr values accepted by the authorization endpoint
    pub acr_values_supported: Vec<String>,
    /// Static identity-profile fields for userinfo claims
    pub profiles: IdentityProfiles,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HOST` - Public hostname (default: "localhost:8080")
    /// - `PROTOCOL` - URL scheme for advertised URLs (default: "http")
    /// - `BASIC_AUTH_VALUE` - Expected Basic credential (default: base64 "test:test")
    /// - `AUTHORIZATION_ENDPOINT` / `TOKEN_ENDPOINT` / `USERINFO_ENDPOINT` -
    ///   Endpoint paths (defaults: "/authorize", "/token", "/userinfo")
    /// - `SCOPES_SUPPORTED` - Comma-separated scope list (default: "openid")
    /// - `ACR_VALUES_SUPPORTED` - Comma-separated acr list (default: the
    ///   mobile-ID and smart-card flows)
    /// - `SERIAL_NUMBER`, `MOBILE_GIVEN_NAME`, `MOBILE_FAMILY_NAME`,
    ///   `SC_GIVEN_NAME`, `SC_FAMILY_NAME` - Identity-profile fields
    ///
    /// The bind address and port are CLI concerns, see `main.rs`.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "localhost:8080"),
            protocol: env_or("PROTOCOL", "http"),
            basic_auth_value: env_or("BASIC_AUTH_VALUE", "dGVzdDp0ZXN0"),
            authorization_endpoint: env_or("AUTHORIZATION_ENDPOINT", "/authorize"),
            token_endpoint: env_or("TOKEN_ENDPOINT", "/token"),
            userinfo_endpoint: env_or("USERINFO_ENDPOINT", "/userinfo"),
            scopes_supported: env_list("SCOPES_SUPPORTED", "openid"),
            acr_values_supported: env_list(
                "ACR_VALUES_SUPPORTED",
                &format!("{},{}", ACR_MOBILE_ID, ACR_SMART_CARD),
            ),
            profiles: IdentityProfiles {
                serial_number: env_or("SERIAL_NUMBER", "PNOLV-010180-10006"),
                mobile_given_name: env_or("MOBILE_GIVEN_NAME", "Andris"),
                mobile_family_name: env_or("MOBILE_FAMILY_NAME", "Paraudziņš"),
                sc_given_name: env_or("SC_GIVEN_NAME", "Anna"),
                sc_family_name: env_or("SC_FAMILY_NAME", "Liepa"),
            },
        }
    }

    /// Issuer URL advertised in the discovery document.
    pub fn issuer(&self) -> String {
        format!("{}://{}", self.protocol, self.host)
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.issuer(), path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Environment variable with a fallback value.
fn env_or(key: &str, fallback: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => fallback.to_string(),
    }
}

/// Comma-separated environment variable with a fallback value.
fn env_list(key: &str, fallback: &str) -> Vec<String> {
    let value = env_or(key, fallback);
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|item| item.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        env::remove_var("HOST");
        env::remove_var("PROTOCOL");
        env::remove_var("BASIC_AUTH_VALUE");
        env::remove_var("SCOPES_SUPPORTED");
        env::remove_var("ACR_VALUES_SUPPORTED");

        let config = Config::from_env();

        assert_eq!(config.host, "localhost:8080");
        assert_eq!(config.protocol, "http");
        assert_eq!(config.basic_auth_value, "dGVzdDp0ZXN0");
        assert_eq!(config.authorization_endpoint, "/authorize");
        assert_eq!(config.scopes_supported, vec!["openid"]);
        assert_eq!(config.acr_values_supported.len(), 2);
    }

    #[test]
    fn issuer_combines_protocol_and_host() {
        let mut config = Config::from_env();
        config.protocol = "https".to_string();
        config.host = "idp.example.com".to_string();

        assert_eq!(config.issuer(), "https://idp.example.com");
        assert_eq!(
            config.endpoint_url("/authorize"),
            "https://idp.example.com/authorize"
        );
    }

    #[test]
    fn env_list_splits_and_trims() {
        let list = env_list("UNSET_ENV_LIST_TEST", "openid, profile,email");
        assert_eq!(list, vec!["openid", "profile", "email"]);
    }
}
