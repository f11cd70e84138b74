//! Synchronous calling convention.
//!
//! [`BlockingInferenceClient`] wraps an [`InferenceClient`] together with a
//! private current-thread runtime; every method blocks until the response is
//! fully received or an error occurs. Like `reqwest::blocking`, it must not be
//! used from inside an async context.

use crate::client::InferenceClient;
use crate::error::LlmError;
use crate::types::{
    ChatRequest, ChatResult, EmbeddingRequest, EmbeddingResult, ImageRequest, ImageResult,
    TranscriptionRequest, TranscriptionResult,
};
use tokio::runtime::{Builder, Runtime};

/// Blocking facade over [`InferenceClient`].
pub struct BlockingInferenceClient {
    inner: InferenceClient,
    runtime: Runtime,
}

impl BlockingInferenceClient {
    pub fn new(inner: InferenceClient) -> Result<Self, LlmError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                LlmError::ConfigurationError(format!("Failed to start blocking runtime: {e}"))
            })?;
        Ok(Self { inner, runtime })
    }

    /// The wrapped async client.
    pub fn async_client(&self) -> &InferenceClient {
        &self.inner
    }

    pub fn chat(&self, request: &ChatRequest) -> Result<ChatResult, LlmError> {
        self.runtime.block_on(self.inner.chat(request))
    }

    pub fn generate_image(&self, request: &ImageRequest) -> Result<ImageResult, LlmError> {
        self.runtime.block_on(self.inner.generate_image(request))
    }

    pub fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResult, LlmError> {
        self.runtime.block_on(self.inner.transcribe(request))
    }

    pub fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResult, LlmError> {
        self.runtime.block_on(self.inner.embed(request))
    }
}

impl std::fmt::Debug for BlockingInferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingInferenceClient")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
