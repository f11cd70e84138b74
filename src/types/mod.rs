//! Request and response payloads for every operation kind.

pub mod audio;
pub mod chat;
pub mod common;
pub mod embedding;
pub mod image;

pub use audio::{TranscriptionFormat, TranscriptionRequest, TranscriptionResult, TranscriptionSegment};
pub use chat::{ChatChoice, ChatMessage, ChatRequest, ChatResult, ChatRole};
pub use common::Usage;
pub use embedding::{Embedding, EmbeddingEncoding, EmbeddingRequest, EmbeddingResult};
pub use image::{GeneratedImage, ImageRequest, ImageResponseFormat, ImageResult};

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("non_blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}
