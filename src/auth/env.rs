//! Token provider backed by a pre-minted token in the environment.

use crate::auth::TokenProvider;
use crate::error::LlmError;
use async_trait::async_trait;

/// Environment variable read by [`EnvTokenProvider::default`].
pub const AD_TOKEN_ENV: &str = "AZURE_OPENAI_AD_TOKEN";

/// Reads a bearer token from an environment variable on every call.
///
/// The variable is re-read each time so an external process can rotate it.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(AD_TOKEN_ENV)
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn token(&self, _scope: &str) -> Result<String, LlmError> {
        match std::env::var(&self.var) {
            Ok(tok) if !tok.trim().is_empty() => Ok(tok.trim().to_string()),
            _ => Err(LlmError::AuthenticationError(format!(
                "environment variable {} is not set",
                self.var
            ))),
        }
    }
}
