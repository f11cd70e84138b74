//! HTTP error normalization
//!
//! Turns a non-success response into a `ServiceError` carrying the exact
//! status and, when the service sent JSON, the structured body.

use crate::error::LlmError;
use crate::execution::transport::HttpTransportResponse;

/// Classify a non-success response.
///
/// The message prefers `error.message` from an OpenAI/Azure style body
/// (`{"error": {"code": .., "message": ..}}`), then a top-level `message`,
/// then the raw text, then the canonical reason phrase.
pub fn classify_service_error(response: &HttpTransportResponse) -> LlmError {
    let text = response.text();
    let body = serde_json::from_str::<serde_json::Value>(&text).ok();

    let message = body
        .as_ref()
        .and_then(|json| {
            json.pointer("/error/message")
                .or_else(|| json.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(response.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("request failed")
                .to_string()
        });

    LlmError::service_error(response.status, message, body)
}
