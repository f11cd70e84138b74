//! HTTP Headers Utility
//!
//! Builds the header set shared by every outgoing request.

use crate::error::LlmError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::collections::HashMap;

/// Header carrying a per-request correlation id (echoed by Azure services).
pub const CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add user agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, LlmError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| LlmError::ConfigurationError(format!("Invalid user agent: {e}")))?,
        );
        Ok(self)
    }

    /// Add a client request id
    pub fn with_client_request_id(mut self, id: &uuid::Uuid) -> Self {
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            self.headers
                .insert(HeaderName::from_static(CLIENT_REQUEST_ID), value);
        }
        self
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, LlmError> {
        for (key, value) in custom_headers {
            let (name, value) = parse_header(key, value)?;
            self.headers.insert(name, value);
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a header name/value pair.
pub fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), LlmError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| LlmError::ConfigurationError(format!("Invalid header name '{name}': {e}")))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| {
        LlmError::ConfigurationError(format!("Invalid header value for '{name}': {e}"))
    })?;
    Ok((header_name, header_value))
}
