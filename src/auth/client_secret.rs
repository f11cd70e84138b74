//! Microsoft Entra ID client-credentials token provider.
//!
//! This provider implements the OAuth 2.0 client credentials grant against the
//! Entra ID v2 token endpoint. Tokens are cached in-memory per scope and
//! refreshed before expiration.

use crate::auth::TokenProvider;
use crate::error::LlmError;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default Entra ID authority host
const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
/// Safety window (seconds) to refresh before expiry
const EXPIRY_SAFETY_WINDOW: i64 = 300; // 5 minutes
/// Upper bound for one token exchange; the cache lock is held for its duration
const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: SecretString,
    /// Unix timestamp seconds when token expires
    exp_unix: i64,
}

/// Client-secret credential with in-memory caching.
///
/// The cache mutex is held across the token request, so concurrent callers
/// for a cold or stale scope wait for one exchange instead of each issuing
/// their own.
pub struct ClientSecretCredential {
    tenant_id: String,
    client_id: String,
    client_secret: SecretString,
    authority: String,
    http: reqwest::Client,
    timeout: Duration,
    cache: Mutex<HashMap<String, CachedToken>>,
}

impl ClientSecretCredential {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            authority: DEFAULT_AUTHORITY.to_string(),
            http: reqwest::Client::new(),
            timeout: DEFAULT_TOKEN_TIMEOUT,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Override the authority host (sovereign clouds, tests).
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    /// Timeout for one token exchange (default 30s). Concurrent callers for
    /// the same credential wait at most this long behind a hung exchange.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a shared reqwest client.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority.trim_end_matches('/'),
            self.tenant_id
        )
    }

    async fn fetch_new_token(&self, scope: &str) -> Result<CachedToken, LlmError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("scope", scope),
        ];

        let resp = self
            .http
            .post(self.token_url())
            .timeout(self.timeout)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                LlmError::AuthenticationError(format!("Token endpoint request failed: {e}"))
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            LlmError::AuthenticationError(format!("Failed to read token response: {e}"))
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<TokenErrorResponse>(&text)
                .map(|e| match e.error_description {
                    Some(desc) => format!("{}: {desc}", e.error),
                    None => e.error,
                })
                .unwrap_or(text);
            return Err(LlmError::AuthenticationError(format!(
                "Token endpoint returned {}: {detail}",
                status.as_u16()
            )));
        }

        let tr: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::AuthenticationError(format!("Failed to parse token response: {e}"))
        })?;
        let now = chrono::Utc::now().timestamp();
        Ok(CachedToken {
            token: SecretString::from(tr.access_token),
            exp_unix: now + tr.expires_in.unwrap_or(3600),
        })
    }
}

#[async_trait]
impl TokenProvider for ClientSecretCredential {
    async fn token(&self, scope: &str) -> Result<String, LlmError> {
        let mut cache = self.cache.lock().await;
        let now = chrono::Utc::now().timestamp();
        if let Some(ct) = cache.get(scope)
            && ct.exp_unix - EXPIRY_SAFETY_WINDOW > now
        {
            return Ok(ct.token.expose_secret().to_string());
        }

        tracing::debug!(target: "foundry_client::auth", tenant = %self.tenant_id, scope = %scope, "requesting new access token");
        let fresh = self.fetch_new_token(scope).await?;
        let token = fresh.token.expose_secret().to_string();
        cache.insert(scope.to_string(), fresh);
        Ok(token)
    }
}

impl std::fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}
