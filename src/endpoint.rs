//! Service endpoint and URL routing.

use crate::error::LlmError;
use reqwest::Url;
use std::fmt;

/// Validated base URL of the target service instance.
///
/// Accepts absolute `http`/`https` URLs with a host. Trailing slashes are
/// dropped so paths can be appended verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self, LlmError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LlmError::ConfigurationError(
                "endpoint cannot be empty".to_string(),
            ));
        }
        let url = Url::parse(trimmed).map_err(|e| {
            LlmError::ConfigurationError(format!("endpoint '{trimmed}' is not a valid URL: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LlmError::ConfigurationError(format!(
                "endpoint '{trimmed}' must use http or https"
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(LlmError::ConfigurationError(format!(
                "endpoint '{trimmed}' has no host"
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(LlmError::ConfigurationError(format!(
                "endpoint '{trimmed}' must not carry a query or fragment"
            )));
        }
        Ok(Self {
            base: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Endpoint").field(&self.base).finish()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

impl std::str::FromStr for Endpoint {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// URL-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlConfig {
    /// Sent as the `api-version` query parameter when set.
    pub api_version: Option<String>,
    /// Use deployment-based URLs:
    /// `{endpoint}/deployments/{model}{path}`. The endpoint is then expected to
    /// end in `/openai` (e.g. `https://{resource}.openai.azure.com/openai`).
    pub use_deployment_based_urls: bool,
}

impl UrlConfig {
    /// Full request URL for `path` (which starts with `/`).
    pub fn build_url(&self, endpoint: &Endpoint, model: &str, path: &str) -> String {
        let mut url = if self.use_deployment_based_urls {
            format!(
                "{}/deployments/{}{}",
                endpoint.as_str(),
                urlencoding::encode(model.trim()),
                path
            )
        } else {
            format!("{}{}", endpoint.as_str(), path)
        };
        if let Some(version) = self.api_version.as_deref().map(str::trim)
            && !version.is_empty()
        {
            url.push_str("?api-version=");
            url.push_str(&urlencoding::encode(version));
        }
        url
    }
}
