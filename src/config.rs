//! Client configuration.
//!
//! [`ClientConfig`] gathers everything needed to build a client: endpoint,
//! deployment, authentication mode and URL options. It deserializes from any
//! serde format and can be loaded from the environment.

use crate::auth::{
    ApiKeyPlacement, COGNITIVE_SERVICES_SCOPE, ClientSecretCredential, Credential,
    EnvTokenProvider,
};
use crate::client::{ClientBuilder, InferenceClient};
use crate::endpoint::Endpoint;
use crate::error::LlmError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_AUTH: &str = "AZURE_OPENAI_AUTH";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_SCOPE: &str = "AZURE_OPENAI_SCOPE";
pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";

fn default_scope() -> String {
    COGNITIVE_SERVICES_SCOPE.to_string()
}

/// Authentication mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AuthConfig {
    /// Static API key.
    Key {
        api_key: SecretString,
        #[serde(default)]
        placement: ApiKeyPlacement,
    },
    /// Entra ID client-credentials exchange.
    Entra {
        tenant_id: String,
        client_id: String,
        client_secret: SecretString,
        #[serde(default = "default_scope")]
        scope: String,
        #[serde(default)]
        authority: Option<String>,
    },
    /// Pre-minted token read from `AZURE_OPENAI_AD_TOKEN`.
    EnvToken {
        #[serde(default = "default_scope")]
        scope: String,
    },
}

/// Everything needed to build a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Deployment / model identifier used by callers when building requests.
    pub deployment: String,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub use_deployment_based_urls: bool,
    pub auth: AuthConfig,
}

impl ClientConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables (`AZURE_OPENAI_*`, `AZURE_*`).
    ///
    /// `AZURE_OPENAI_AUTH` selects the mode: `key` (default), `entra` or `env_token`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                LlmError::ConfigurationError(format!("environment variable {key} is not set"))
            })
        };

        let scope = get(ENV_SCOPE).unwrap_or_else(default_scope);
        let mode = get(ENV_AUTH).unwrap_or_else(|| "key".to_string());
        let auth = match mode.to_ascii_lowercase().as_str() {
            "key" => AuthConfig::Key {
                api_key: SecretString::from(require(ENV_API_KEY)?),
                placement: ApiKeyPlacement::default(),
            },
            "entra" => AuthConfig::Entra {
                tenant_id: require(ENV_TENANT_ID)?,
                client_id: require(ENV_CLIENT_ID)?,
                client_secret: SecretString::from(require(ENV_CLIENT_SECRET)?),
                scope,
                authority: None,
            },
            "env_token" => AuthConfig::EnvToken { scope },
            other => {
                return Err(LlmError::ConfigurationError(format!(
                    "unknown {ENV_AUTH} value '{other}' (expected key, entra or env_token)"
                )));
            }
        };

        let config = Self {
            endpoint: require(ENV_ENDPOINT)?,
            deployment: require(ENV_DEPLOYMENT)?,
            api_version: get(ENV_API_VERSION),
            use_deployment_based_urls: false,
            auth,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        Endpoint::parse(&self.endpoint)?;
        if self.deployment.trim().is_empty() {
            return Err(LlmError::ConfigurationError(
                "deployment cannot be empty".to_string(),
            ));
        }
        match &self.auth {
            AuthConfig::Key { api_key, .. } if api_key.expose_secret().trim().is_empty() => Err(
                LlmError::ConfigurationError("API key cannot be empty".to_string()),
            ),
            AuthConfig::Entra {
                tenant_id,
                client_id,
                client_secret,
                scope,
                ..
            } => {
                if tenant_id.trim().is_empty()
                    || client_id.trim().is_empty()
                    || client_secret.expose_secret().trim().is_empty()
                {
                    return Err(LlmError::ConfigurationError(
                        "Entra ID auth needs tenant_id, client_id and client_secret".to_string(),
                    ));
                }
                if scope.trim().is_empty() {
                    return Err(LlmError::ConfigurationError(
                        "scope cannot be empty".to_string(),
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// The credential described by `auth`.
    pub fn credential(&self) -> Credential {
        match &self.auth {
            AuthConfig::Key { api_key, .. } => Credential::ApiKey(api_key.clone()),
            AuthConfig::Entra {
                tenant_id,
                client_id,
                client_secret,
                scope,
                authority,
            } => {
                let mut provider = ClientSecretCredential::new(
                    tenant_id,
                    client_id,
                    client_secret.expose_secret(),
                );
                if let Some(authority) = authority {
                    provider = provider.with_authority(authority);
                }
                Credential::token_with_scope(Arc::new(provider), scope)
            }
            AuthConfig::EnvToken { scope } => {
                Credential::token_with_scope(Arc::new(EnvTokenProvider::default()), scope)
            }
        }
    }

    /// A builder pre-populated from this configuration.
    pub fn builder(&self) -> Result<ClientBuilder, LlmError> {
        self.validate()?;
        let mut builder = InferenceClient::builder(&self.endpoint, self.credential())
            .with_deployment_urls(self.use_deployment_based_urls);
        if let Some(version) = &self.api_version {
            builder = builder.with_api_version(version);
        }
        if let AuthConfig::Key { placement, .. } = &self.auth {
            builder = builder.with_api_key_placement(*placement);
        }
        Ok(builder)
    }

    pub fn into_client(self) -> Result<InferenceClient, LlmError> {
        self.builder()?.build()
    }
}
