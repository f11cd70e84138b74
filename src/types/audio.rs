//! Audio transcription payloads

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Requested transcription output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionFormat {
    Json,
    VerboseJson,
    Text,
    Srt,
    Vtt,
}

impl TranscriptionFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::VerboseJson => "verbose_json",
            Self::Text => "text",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    /// Formats whose response body is JSON rather than plain text.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json | Self::VerboseJson)
    }
}

fn non_empty_path(path: &PathBuf) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        let mut err = ValidationError::new("non_empty_path");
        err.message = Some("an audio file path is required".into());
        return Err(err);
    }
    Ok(())
}

/// Speech-to-text request for a local audio file.
#[derive(Debug, Clone, Default, Validate)]
pub struct TranscriptionRequest {
    /// Deployment / model identifier
    #[validate(custom(function = "super::non_blank"))]
    pub model: String,
    /// Local audio file to upload. It is read fully into memory before the
    /// request is sent; the service caps uploads at 25 MB.
    #[validate(custom(function = "non_empty_path"))]
    pub file: PathBuf,
    /// ISO-639-1 language hint
    pub language: Option<String>,
    /// Optional text to guide style or continue a previous segment
    pub prompt: Option<String>,
    pub response_format: Option<TranscriptionFormat>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub temperature: Option<f32>,
}

impl TranscriptionRequest {
    pub fn new(model: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            file: file.into(),
            ..Default::default()
        }
    }
}

/// A timed segment (verbose JSON output only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    #[serde(default)]
    pub id: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Transcription result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub segments: Vec<TranscriptionSegment>,
}
