//! Image generation payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How generated images are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    Url,
    B64Json,
}

/// Image generation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ImageRequest {
    /// Deployment / model identifier
    #[validate(custom(function = "super::non_blank"))]
    pub model: String,
    /// Text prompt describing the image
    #[validate(custom(function = "super::non_blank"))]
    pub prompt: String,
    /// Number of images to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10))]
    pub n: Option<u32>,
    /// Image size (e.g., "1024x1024")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// One generated image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

/// Image generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

impl ImageResult {
    /// URLs of all images returned by URL.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.data.iter().filter_map(|img| img.url.as_deref())
    }
}
