//! Inference client
//!
//! [`InferenceClient`] owns an endpoint, a credential and a transport, and
//! exposes one typed method per operation kind. It holds no per-call state, so
//! a single instance can be cloned freely and used from many tasks at once.
//!
//! ```rust,ignore
//! use foundry_client::prelude::*;
//!
//! let client = InferenceClient::build(
//!     "https://my-resource.openai.azure.com/openai/v1",
//!     Credential::api_key(std::env::var("AZURE_OPENAI_API_KEY")?),
//! )?;
//! let result = client
//!     .chat(&ChatRequest::new("gpt-4o", vec![ChatMessage::user("What is the capital of France?")]))
//!     .await?;
//! println!("{}", result.first_text().unwrap_or_default());
//! ```

use crate::auth::{ApiKeyPlacement, Credential};
use crate::blocking::BlockingInferenceClient;
use crate::endpoint::{Endpoint, UrlConfig};
use crate::error::LlmError;
use crate::execution::headers::parse_header;
use crate::execution::interceptor::{HttpInterceptor, LoggingInterceptor};
use crate::execution::transport::{HttpTransport, ReqwestTransport};
use crate::executors;
use crate::types::{
    ChatRequest, ChatResult, EmbeddingRequest, EmbeddingResult, ImageRequest, ImageResult,
    TranscriptionRequest, TranscriptionResult,
};
use crate::utils::cancel::PendingCall;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const DEFAULT_USER_AGENT: &str = concat!("foundry-client/", env!("CARGO_PKG_VERSION"));

pub(crate) struct ClientInner {
    pub(crate) endpoint: Endpoint,
    pub(crate) credential: Credential,
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) url_config: UrlConfig,
    pub(crate) api_key_placement: ApiKeyPlacement,
    pub(crate) extra_headers: HashMap<String, String>,
    pub(crate) interceptors: Vec<Arc<dyn HttpInterceptor>>,
    pub(crate) user_agent: String,
}

/// Client for a hosted inference API.
#[derive(Clone)]
pub struct InferenceClient {
    inner: Arc<ClientInner>,
}

static_assertions::assert_impl_all!(InferenceClient: Send, Sync, Clone);

impl InferenceClient {
    /// Build a client with default options.
    ///
    /// Fails with `ConfigurationError` when `endpoint` is empty or malformed.
    pub fn build(endpoint: &str, credential: Credential) -> Result<Self, LlmError> {
        Self::builder(endpoint, credential).build()
    }

    pub fn builder(endpoint: impl Into<String>, credential: Credential) -> ClientBuilder {
        ClientBuilder::new(endpoint, credential)
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    pub fn credential(&self) -> &Credential {
        &self.inner.credential
    }

    /// Create a chat completion.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResult, LlmError> {
        executors::chat::execute(&self.inner, request).await
    }

    /// Generate images from a prompt.
    pub async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResult, LlmError> {
        executors::image::execute(&self.inner, request).await
    }

    /// Transcribe a local audio file.
    pub async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResult, LlmError> {
        executors::audio::execute(&self.inner, request).await
    }

    /// Embed one or more inputs.
    pub async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResult, LlmError> {
        executors::embedding::execute(&self.inner, request).await
    }

    /// Start a chat completion and return a handle to join later.
    pub fn spawn_chat(&self, request: ChatRequest) -> PendingCall<ChatResult> {
        let client = self.clone();
        PendingCall::spawn(async move { client.chat(&request).await })
    }

    pub fn spawn_image(&self, request: ImageRequest) -> PendingCall<ImageResult> {
        let client = self.clone();
        PendingCall::spawn(async move { client.generate_image(&request).await })
    }

    pub fn spawn_transcription(
        &self,
        request: TranscriptionRequest,
    ) -> PendingCall<TranscriptionResult> {
        let client = self.clone();
        PendingCall::spawn(async move { client.transcribe(&request).await })
    }

    pub fn spawn_embedding(&self, request: EmbeddingRequest) -> PendingCall<EmbeddingResult> {
        let client = self.clone();
        PendingCall::spawn(async move { client.embed(&request).await })
    }
}

impl fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceClient")
            .field("endpoint", &self.inner.endpoint)
            .field("credential", &self.inner.credential)
            .field("url_config", &self.inner.url_config)
            .field("api_key_placement", &self.inner.api_key_placement)
            .field("interceptors", &self.inner.interceptors.len())
            .finish()
    }
}

/// Builder for [`InferenceClient`] and [`BlockingInferenceClient`].
pub struct ClientBuilder {
    endpoint: String,
    credential: Credential,
    transport: Option<Arc<dyn HttpTransport>>,
    url_config: UrlConfig,
    api_key_placement: ApiKeyPlacement,
    extra_headers: HashMap<String, String>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    http_debug: bool,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn new(endpoint: impl Into<String>, credential: Credential) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential,
            transport: None,
            url_config: UrlConfig::default(),
            api_key_placement: ApiKeyPlacement::default(),
            extra_headers: HashMap::new(),
            interceptors: Vec::new(),
            http_debug: false,
            user_agent: None,
        }
    }

    /// Set a custom HTTP transport. Defaults to [`ReqwestTransport`].
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Append `?api-version=<version>` to every request.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.url_config.api_version = Some(version.into());
        self
    }

    /// Route through `{endpoint}/deployments/{model}{path}`.
    pub fn with_deployment_urls(mut self, enabled: bool) -> Self {
        self.url_config.use_deployment_based_urls = enabled;
        self
    }

    pub fn with_url_config(mut self, url_config: UrlConfig) -> Self {
        self.url_config = url_config;
        self
    }

    pub fn with_api_key_placement(mut self, placement: ApiKeyPlacement) -> Self {
        self.api_key_placement = placement;
        self
    }

    /// Static header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Enable a built-in logging interceptor for HTTP debugging (no sensitive data).
    pub fn with_http_debug(mut self, enabled: bool) -> Self {
        self.http_debug = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the async client.
    pub fn build(self) -> Result<InferenceClient, LlmError> {
        let endpoint = Endpoint::parse(&self.endpoint)?;
        for (name, value) in &self.extra_headers {
            parse_header(name, value)?;
        }

        let mut interceptors = self.interceptors;
        if self.http_debug {
            interceptors.push(Arc::new(LoggingInterceptor));
        }

        let inner = ClientInner {
            endpoint,
            credential: self.credential,
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::default())),
            url_config: self.url_config,
            api_key_placement: self.api_key_placement,
            extra_headers: self.extra_headers,
            interceptors,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };
        Ok(InferenceClient {
            inner: Arc::new(inner),
        })
    }

    /// Build a client whose calls block until completion.
    pub fn build_blocking(self) -> Result<BlockingInferenceClient, LlmError> {
        BlockingInferenceClient::new(self.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_bad_endpoint() {
        let err = InferenceClient::build("", Credential::api_key("k")).unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
        let err = InferenceClient::build("res.openai.azure.com", Credential::api_key("k"))
            .unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
    }

    #[test]
    fn build_rejects_invalid_extra_header() {
        let err = InferenceClient::builder("https://res.openai.azure.com", Credential::api_key("k"))
            .with_header("bad header", "v")
            .build()
            .unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
    }

    #[test]
    fn debug_does_not_leak_key() {
        let client =
            InferenceClient::build("https://res.openai.azure.com", Credential::api_key("sekret"))
                .unwrap();
        let text = format!("{client:?}");
        assert!(text.contains("res.openai.azure.com"));
        assert!(!text.contains("sekret"));
    }
}
