//! In-memory credential storage for authorization codes and access tokens.
//!
//! The store owns both tables and all mutation paths. Codes are single-use:
//! [`CredentialStore::take_auth_code`] removes the entry under the write lock,
//! so at most one redemption attempt ever sees a given code as valid, even
//! when token requests race. Access tokens are read non-destructively until
//! they expire. Data is not persisted and is lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tokio::sync::RwLock;

/// Lifetime of an authorization code, in seconds.
pub const CODE_TTL_SECS: i64 = 600;

/// Lifetime of an access token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 600;

/// A pending authorization code awaiting redemption.
#[derive(Debug, Clone)]
pub struct AuthCode {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub acr_value: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// An issued access token, valid for repeated userinfo calls until expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub acr_value: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Concurrency-safe keyed storage for codes and tokens.
///
/// Cloning is cheap and clones share the same underlying tables.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    codes: Arc<RwLock<HashMap<String, AuthCode>>>,
    tokens: Arc<RwLock<HashMap<String, AccessToken>>>,
    code_ttl: Duration,
    token_ttl: Duration,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Creates an empty store with the default 10-minute TTLs.
    pub fn new() -> Self {
        Self::with_ttls(
            Duration::seconds(CODE_TTL_SECS),
            Duration::seconds(TOKEN_TTL_SECS),
        )
    }

    /// Creates an empty store with explicit TTLs. Used by tests to exercise
    /// expiry without waiting out the real lifetimes.
    pub fn with_ttls(code_ttl: Duration, token_ttl: Duration) -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            tokens: Arc::new(RwLock::new(HashMap::new())),
            code_ttl,
            token_ttl,
        }
    }

    /// Stores a freshly minted authorization code.
    ///
    /// Code values carry 256 bits of randomness, so key collisions are not a
    /// practical concern and are not handled.
    pub async fn put_auth_code(
        &self,
        value: &str,
        client_id: &str,
        redirect_uri: &str,
        scope: &str,
        acr_value: &str,
    ) {
        let now = Utc::now();
        let mut codes = self.codes.write().await;
        codes.insert(
            value.to_string(),
            AuthCode {
                client_id: client_id.to_string(),
                redirect_uri: redirect_uri.to_string(),
                scope: scope.to_string(),
                acr_value: acr_value.to_string(),
                issued_at: now,
                expires_at: now + self.code_ttl,
            },
        );
    }

    /// Atomically looks up and removes an authorization code.
    ///
    /// Returns `None` if the code never existed or has expired. The entry is
    /// removed in the same critical section regardless of outcome, so a given
    /// code can never be redeemed twice: when two token requests race on the
    /// same code, exactly one sees `Some`.
    pub async fn take_auth_code(&self, value: &str) -> Option<AuthCode> {
        let mut codes = self.codes.write().await;
        codes.remove(value).filter(|code| Utc::now() < code.expires_at)
    }

    /// Stores a freshly minted access token carrying the redeemed code's
    /// acr value.
    pub async fn put_access_token(&self, value: &str, acr_value: &str) {
        let now = Utc::now();
        let mut tokens = self.tokens.write().await;
        tokens.insert(
            value.to_string(),
            AccessToken {
                acr_value: acr_value.to_string(),
                issued_at: now,
                expires_at: now + self.token_ttl,
            },
        );
    }

    /// Non-destructive access-token lookup.
    ///
    /// Returns `None` if the token is absent or expired. Expired entries stay
    /// in the table until the next sweep; concurrent userinfo calls are never
    /// affected by a lookup.
    pub async fn get_access_token(&self, value: &str) -> Option<AccessToken> {
        let tokens = self.tokens.read().await;
        tokens
            .get(value)
            .filter(|token| Utc::now() < token.expires_at)
            .cloned()
    }

    /// Removes every code and token whose expiry has passed. Returns the
    /// number of entries removed. Idempotent and safe to call concurrently
    /// with all other operations.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;

        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|_, code| now < code.expires_at);
        removed += before - codes.len();
        drop(codes);

        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, token| now < token.expires_at);
        removed += before - tokens.len();

        removed
    }

    #[cfg(test)]
    pub(crate) async fn credential_count(&self) -> usize {
        self.codes.read().await.len() + self.tokens.read().await.len()
    }
}

/// Generates a random authorization code: 256 bits of entropy, hex-encoded.
pub fn generate_auth_code() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generates a random access token: 256 bits of entropy, URL-safe base64.
pub fn generate_access_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE.encode(bytes)
}

/// Generates a random subject identifier: 128 bits of entropy, hex-encoded.
pub fn generate_subject() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
