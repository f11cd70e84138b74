//! HTTP Interceptor interfaces
//!
//! Interceptors observe each request right before it reaches the transport,
//! observe responses, and are notified of errors. Hooks are best-effort and
//! should avoid expensive work.

use crate::error::LlmError;
use crate::execution::transport::{HttpTransportRequest, HttpTransportResponse};

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    /// Operation name (`chat`, `image`, `transcription`, `embedding`)
    pub operation: &'static str,
    pub model: String,
    pub url: String,
    pub request_id: String,
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Interceptors may add headers. Return an
    /// error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        _request: &mut HttpTransportRequest,
    ) -> Result<(), LlmError> {
        Ok(())
    }

    /// Called after a response is received, success or not.
    fn on_response(&self, _ctx: &HttpRequestContext, _response: &HttpTransportResponse) {}

    /// Called when an error occurs during sending or classification.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &LlmError) {}
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        _request: &mut HttpTransportRequest,
    ) -> Result<(), LlmError> {
        tracing::debug!(target: "foundry_client::http", op = ctx.operation, model = %ctx.model, url = %ctx.url, request_id = %ctx.request_id, "sending request");
        Ok(())
    }

    fn on_response(&self, ctx: &HttpRequestContext, response: &HttpTransportResponse) {
        tracing::debug!(target: "foundry_client::http", op = ctx.operation, request_id = %ctx.request_id, status = response.status, bytes = response.body.len(), "response received");
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &LlmError) {
        tracing::debug!(target: "foundry_client::http", op = ctx.operation, request_id = %ctx.request_id, err = %error, "request error");
    }
}
