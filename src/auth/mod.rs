//! Authentication helpers and token providers.
//!
//! A client authenticates with exactly one [`Credential`]:
//! - a static API key, or
//! - a bearer token minted by an identity provider for a fixed scope.
//!
//! The identity side is abstracted by [`TokenProvider`]; caching and refresh of
//! tokens, when wanted, is the provider's job.

use crate::error::LlmError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub mod client_secret;
pub mod env;

pub use client_secret::ClientSecretCredential;
pub use env::EnvTokenProvider;

/// Scope used to mint tokens for Azure AI / Cognitive Services endpoints.
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// An async Bearer token provider.
///
/// Notes:
/// - Implementations must be safe for concurrent invocation; one client may
///   resolve credentials for many in-flight requests at once.
/// - Implementations may cache internally and refresh tokens when necessary.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns an access token for `scope`, suitable for `Authorization: Bearer <token>`.
    async fn token(&self, scope: &str) -> Result<String, LlmError>;
}

/// A simple static token provider useful for tests and basic scenarios where
/// the token is managed externally.
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    /// Create a new static token provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self, _scope: &str) -> Result<String, LlmError> {
        Ok(self.token.expose_secret().to_string())
    }
}

type TokenFn = dyn Fn(String) -> BoxFuture<'static, Result<String, LlmError>> + Send + Sync;

/// Adapts an async closure into a [`TokenProvider`].
///
/// ```rust,ignore
/// let provider = FnTokenProvider::new(|scope| async move { fetch(scope).await });
/// ```
pub struct FnTokenProvider {
    f: Box<TokenFn>,
}

impl FnTokenProvider {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<String, LlmError>> + Send + 'static,
    {
        Self {
            f: Box::new(move |scope| Box::pin(f(scope))),
        }
    }
}

#[async_trait]
impl TokenProvider for FnTokenProvider {
    async fn token(&self, scope: &str) -> Result<String, LlmError> {
        (self.f)(scope.to_string()).await
    }
}

/// Where a static API key is placed on the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyPlacement {
    /// `api-key: <key>` (Azure OpenAI resource endpoints).
    #[default]
    ApiKeyHeader,
    /// `Authorization: Bearer <key>` (OpenAI-compatible `/openai/v1` endpoints).
    Bearer,
}

/// The value attached to one outgoing request.
#[derive(Clone)]
pub enum AuthorizationValue {
    ApiKey(SecretString),
    Bearer(SecretString),
}

impl AuthorizationValue {
    /// Raw credential string (key or token).
    pub fn secret(&self) -> &str {
        match self {
            Self::ApiKey(s) | Self::Bearer(s) => s.expose_secret(),
        }
    }

    /// Insert the credential into `headers`.
    pub fn apply(&self, headers: &mut HeaderMap, placement: ApiKeyPlacement) -> Result<(), LlmError> {
        let (name, value) = match (self, placement) {
            (Self::ApiKey(key), ApiKeyPlacement::ApiKeyHeader) => {
                (HeaderName::from_static("api-key"), key.expose_secret().to_string())
            }
            (Self::ApiKey(secret), ApiKeyPlacement::Bearer) | (Self::Bearer(secret), _) => {
                (AUTHORIZATION, format!("Bearer {}", secret.expose_secret()))
            }
        };
        let mut value = HeaderValue::from_str(&value).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid authorization header value: {e}"))
        })?;
        value.set_sensitive(true);
        headers.insert(name, value);
        Ok(())
    }
}

impl fmt::Debug for AuthorizationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("AuthorizationValue::ApiKey([REDACTED])"),
            Self::Bearer(_) => f.write_str("AuthorizationValue::Bearer([REDACTED])"),
        }
    }
}

/// The credential a client authenticates with.
#[derive(Clone)]
pub enum Credential {
    /// Static API key.
    ApiKey(SecretString),
    /// Bearer token obtained from an identity provider for `scope`.
    Token {
        provider: Arc<dyn TokenProvider>,
        scope: String,
    },
}

impl Credential {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(SecretString::from(key.into()))
    }

    /// Token credential for the Cognitive Services scope.
    pub fn token(provider: Arc<dyn TokenProvider>) -> Self {
        Self::token_with_scope(provider, COGNITIVE_SERVICES_SCOPE)
    }

    pub fn token_with_scope(provider: Arc<dyn TokenProvider>, scope: impl Into<String>) -> Self {
        Self::Token {
            provider,
            scope: scope.into(),
        }
    }

    /// Produce the authorization value for the next request.
    ///
    /// Identity failures are reported as `AuthenticationError`; they are never retried here.
    pub async fn resolve(&self) -> Result<AuthorizationValue, LlmError> {
        match self {
            Self::ApiKey(key) => {
                if key.expose_secret().trim().is_empty() {
                    return Err(LlmError::ConfigurationError(
                        "API key cannot be empty".to_string(),
                    ));
                }
                Ok(AuthorizationValue::ApiKey(key.clone()))
            }
            Self::Token { provider, scope } => {
                let token = provider.token(scope).await.map_err(|e| match e {
                    LlmError::AuthenticationError(_) | LlmError::OperationCancelled => e,
                    other => LlmError::AuthenticationError(format!(
                        "token acquisition for scope '{scope}' failed: {other}"
                    )),
                })?;
                if token.trim().is_empty() {
                    return Err(LlmError::AuthenticationError(format!(
                        "identity provider returned an empty token for scope '{scope}'"
                    )));
                }
                tracing::trace!(target: "foundry_client::auth", scope = %scope, "resolved bearer token");
                Ok(AuthorizationValue::Bearer(SecretString::from(token)))
            }
        }
    }

    pub const fn is_api_key(&self) -> bool {
        matches!(self, Self::ApiKey(_))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("Credential::ApiKey([REDACTED])"),
            Self::Token { scope, .. } => f
                .debug_struct("Credential::Token")
                .field("scope", scope)
                .finish_non_exhaustive(),
        }
    }
}
