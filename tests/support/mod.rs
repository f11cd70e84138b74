//! Test doubles shared by the integration tests: a recording transport and a
//! counting token provider.
#![allow(dead_code)]

use async_trait::async_trait;
use foundry_client::LlmError;
use foundry_client::auth::TokenProvider;
use foundry_client::execution::{
    HttpTransport, HttpTransportRequest, HttpTransportResponse, TransportBody,
};
use reqwest::header::HeaderMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const ENDPOINT: &str = "https://unit-test.openai.azure.com/openai/v1";

type Responder = dyn Fn(&HttpTransportRequest) -> HttpTransportResponse + Send + Sync;

/// Records every request and answers through a responder closure.
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpTransportRequest>>,
    responder: Box<Responder>,
    delay: Option<Duration>,
}

impl RecordingTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpTransportRequest) -> HttpTransportResponse + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            delay: None,
        }
    }

    /// Always answer with `status` and a JSON `body`.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(move |_| json_response(status, &body))
    }

    /// Sleep before answering (used to hold requests in flight).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpTransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpTransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpTransportRequest) -> Result<HttpTransportResponse, LlmError> {
        let response = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(response)
    }
}

pub fn json_response(status: u16, body: &serde_json::Value) -> HttpTransportResponse {
    HttpTransportResponse {
        status,
        headers: HeaderMap::new(),
        body: serde_json::to_vec(body).unwrap(),
    }
}

pub fn text_response(status: u16, body: &str) -> HttpTransportResponse {
    HttpTransportResponse {
        status,
        headers: HeaderMap::new(),
        body: body.as_bytes().to_vec(),
    }
}

/// JSON body of a captured request.
pub fn json_body(request: &HttpTransportRequest) -> &serde_json::Value {
    match &request.body {
        TransportBody::Json(v) => v,
        other => panic!("expected JSON body, got {other:?}"),
    }
}

pub fn header<'a>(request: &'a HttpTransportRequest, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

/// A chat completion payload with a single assistant choice.
pub fn chat_completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
    })
}

/// Token provider that counts calls and either returns a token or fails.
pub struct CountingTokenProvider {
    calls: AtomicUsize,
    outcome: Result<String, String>,
    scopes: Mutex<Vec<String>>,
}

impl CountingTokenProvider {
    pub fn ok(token: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(token.to_string()),
            scopes: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Err(message.to_string()),
            scopes: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn scopes(&self) -> Vec<String> {
        self.scopes.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenProvider for CountingTokenProvider {
    async fn token(&self, scope: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scopes.lock().unwrap().push(scope.to_string());
        match &self.outcome {
            Ok(token) => Ok(token.clone()),
            Err(message) => Err(LlmError::HttpError(message.clone())),
        }
    }
}
