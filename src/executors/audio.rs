//! Audio transcription executor
//!
//! The audio file is read before the credential is resolved, so an unreadable
//! file never costs a token exchange.

use super::{PreparedRequest, decode_json, send};
use crate::client::ClientInner;
use crate::error::LlmError;
use crate::execution::transport::{MultipartBody, MultipartFile, TransportBody};
use crate::types::{TranscriptionRequest, TranscriptionResult};
use validator::Validate;

pub const TRANSCRIPTIONS_PATH: &str = "/audio/transcriptions";

/// Build the multipart form for `req` from the already-read file bytes.
pub(crate) fn build_form(req: &TranscriptionRequest, bytes: Vec<u8>) -> MultipartBody {
    let file_name = req
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    let mime_type = mime_guess::from_path(&req.file)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let mut form = MultipartBody::default()
        .file(MultipartFile {
            field: "file".to_string(),
            file_name,
            mime_type,
            bytes,
        })
        .text("model", req.model.clone());
    if let Some(language) = &req.language {
        form = form.text("language", language.clone());
    }
    if let Some(prompt) = &req.prompt {
        form = form.text("prompt", prompt.clone());
    }
    if let Some(format) = req.response_format {
        form = form.text("response_format", format.as_str());
    }
    if let Some(temperature) = req.temperature {
        form = form.text("temperature", temperature.to_string());
    }
    form
}

pub(crate) async fn execute(
    inner: &ClientInner,
    req: &TranscriptionRequest,
) -> Result<TranscriptionResult, LlmError> {
    req.validate()?;
    let bytes = tokio::fs::read(&req.file)
        .await
        .map_err(|e| LlmError::file_access(&req.file, &e))?;

    let response = send(
        inner,
        PreparedRequest {
            operation: "transcription",
            model: &req.model,
            path: TRANSCRIPTIONS_PATH,
            body: TransportBody::Multipart(build_form(req, bytes)),
        },
    )
    .await?;

    match req.response_format {
        Some(format) if !format.is_json() => Ok(TranscriptionResult {
            text: response.text(),
            ..Default::default()
        }),
        _ => decode_json(&response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TranscriptionFormat;

    #[test]
    fn form_carries_file_and_options() {
        let req = TranscriptionRequest {
            language: Some("en".to_string()),
            response_format: Some(TranscriptionFormat::VerboseJson),
            ..TranscriptionRequest::new("whisper", "/data/batman.mp3")
        };
        let form = build_form(&req, vec![1, 2, 3]);
        assert_eq!(form.field("model"), Some("whisper"));
        assert_eq!(form.field("language"), Some("en"));
        assert_eq!(form.field("response_format"), Some("verbose_json"));
        assert_eq!(form.field("prompt"), None);
        let file = &form.files[0];
        assert_eq!(file.field, "file");
        assert_eq!(file.file_name, "batman.mp3");
        assert_eq!(file.mime_type, "audio/mpeg");
        assert_eq!(file.bytes, vec![1, 2, 3]);
    }
}
