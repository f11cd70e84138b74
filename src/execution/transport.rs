//! HTTP transport abstraction.
//!
//! Every request leaves the client through an injectable [`HttpTransport`].
//! The default [`ReqwestTransport`] sends over `reqwest`; tests and embedders
//! can substitute their own to observe the final URL/headers/body and return a
//! synthetic response. Timeouts, proxies and any retry policy live here, not
//! in the client.

use crate::error::LlmError;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// One file part of a multipart body.
#[derive(Debug, Clone)]
pub struct MultipartFile {
    /// Form field name (e.g. `file`)
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Inspectable multipart form.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<MultipartFile>,
}

impl MultipartBody {
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, file: MultipartFile) -> Self {
        self.files.push(file);
        self
    }

    /// Value of the first text field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn into_form(self) -> Result<reqwest::multipart::Form, LlmError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|e| LlmError::HttpError(format!("Invalid multipart mime type: {e}")))?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

/// Request body variants.
#[derive(Debug, Clone)]
pub enum TransportBody {
    Json(serde_json::Value),
    Multipart(MultipartBody),
    Empty,
}

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: TransportBody,
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body decoded as (lossy) UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Custom HTTP transport.
///
/// Implementations must be safe for concurrent use. A transport that observes
/// cancellation should return `LlmError::OperationCancelled`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpTransportRequest) -> Result<HttpTransportResponse, LlmError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Per-request timeout applied to every call.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpTransportRequest) -> Result<HttpTransportResponse, LlmError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match request.body {
            TransportBody::Json(json) => builder.json(&json),
            TransportBody::Multipart(body) => builder.multipart(body.into_form()?),
            TransportBody::Empty => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| LlmError::HttpError(e.to_string()))?;
        Ok(HttpTransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_field_lookup() {
        let body = MultipartBody::default()
            .text("model", "whisper")
            .text("language", "en");
        assert_eq!(body.field("model"), Some("whisper"));
        assert_eq!(body.field("prompt"), None);
    }

    #[test]
    fn success_range() {
        let mk = |status| HttpTransportResponse {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        };
        assert!(mk(200).is_success());
        assert!(mk(204).is_success());
        assert!(!mk(302).is_success());
        assert!(!mk(500).is_success());
    }
}
