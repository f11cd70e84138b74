//! Executors Layer
//!
//! Per-operation request building and response decoding, wired through one
//! shared pipeline:
//! validate → resolve credential → build request → send → classify → decode.

pub mod audio;
pub mod chat;
pub mod embedding;
pub mod errors;
pub mod image;

use crate::client::ClientInner;
use crate::error::LlmError;
use crate::execution::headers::HttpHeaderBuilder;
use crate::execution::interceptor::HttpRequestContext;
use crate::execution::transport::{HttpTransportRequest, HttpTransportResponse, TransportBody};
use reqwest::Method;
use serde::de::DeserializeOwned;

/// A validated, serialized request ready for credential resolution and sending.
pub(crate) struct PreparedRequest<'a> {
    pub operation: &'static str,
    pub model: &'a str,
    pub path: &'static str,
    pub body: TransportBody,
}

/// Resolve the credential, send `prepared` and return the successful response.
///
/// Non-success statuses become `ServiceError`; nothing is retried.
pub(crate) async fn send(
    inner: &ClientInner,
    prepared: PreparedRequest<'_>,
) -> Result<HttpTransportResponse, LlmError> {
    let auth = inner.credential.resolve().await?;

    let request_id = uuid::Uuid::new_v4();
    let url = inner
        .url_config
        .build_url(&inner.endpoint, prepared.model, prepared.path);

    let mut builder = HttpHeaderBuilder::new()
        .with_user_agent(&inner.user_agent)?
        .with_client_request_id(&request_id)
        .with_custom_headers(&inner.extra_headers)?;
    if matches!(prepared.body, TransportBody::Json(_)) {
        builder = builder.with_json_content_type();
    }
    let mut headers = builder.build();
    auth.apply(&mut headers, inner.api_key_placement)?;

    let ctx = HttpRequestContext {
        operation: prepared.operation,
        model: prepared.model.to_string(),
        url: url.clone(),
        request_id: request_id.to_string(),
    };
    let mut request = HttpTransportRequest {
        method: Method::POST,
        url,
        headers,
        body: prepared.body,
    };
    for it in &inner.interceptors {
        it.on_before_send(&ctx, &mut request)?;
    }

    let response = match inner.transport.send(request).await {
        Ok(resp) => resp,
        Err(e) => {
            for it in &inner.interceptors {
                it.on_error(&ctx, &e);
            }
            return Err(e);
        }
    };
    for it in &inner.interceptors {
        it.on_response(&ctx, &response);
    }

    if !response.is_success() {
        let error = errors::classify_service_error(&response);
        for it in &inner.interceptors {
            it.on_error(&ctx, &error);
        }
        return Err(error);
    }
    Ok(response)
}

/// Decode a success body into `T`.
pub(crate) fn decode_json<T: DeserializeOwned>(
    response: &HttpTransportResponse,
) -> Result<T, LlmError> {
    serde_json::from_slice(&response.body)
        .map_err(|e| LlmError::ParseError(format!("Failed to parse response JSON: {e}")))
}
