//! Embedding payloads

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::Usage;

/// Wire encoding of returned vectors. Both decode to `f32` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingEncoding {
    Float,
    /// Little-endian `f32` bytes, base64 encoded. Smaller responses.
    Base64,
}

/// Embedding request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmbeddingRequest {
    /// Deployment / model identifier
    #[validate(custom(function = "super::non_blank"))]
    pub model: String,
    /// Texts to embed
    #[validate(length(min = 1, message = "at least one input is required"))]
    pub input: Vec<String>,
    /// Output dimensionality (text-embedding-3 and later)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub dimensions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<EmbeddingEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
            ..Default::default()
        }
    }

    /// Single-input convenience constructor.
    pub fn single(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self::new(model, vec![input.into()])
    }
}

/// One embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    #[serde(default)]
    pub index: u32,
    #[serde(deserialize_with = "float_or_base64")]
    pub embedding: Vec<f32>,
}

fn float_or_base64<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Floats(Vec<f32>),
        Base64(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Floats(values) => Ok(values),
        Raw::Base64(encoded) => decode_base64_vector(&encoded).map_err(serde::de::Error::custom),
    }
}

/// Decode a base64 string of little-endian `f32` values.
pub fn decode_base64_vector(encoded: &str) -> Result<Vec<f32>, String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| format!("invalid base64 embedding: {e}"))?;
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "base64 embedding has {} bytes, not a multiple of 4",
            bytes.len()
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Embedding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResult {
    #[serde(default)]
    pub model: String,
    pub data: Vec<Embedding>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl EmbeddingResult {
    /// Vectors in input order.
    pub fn vectors(&self) -> Vec<&[f32]> {
        let mut data: Vec<&Embedding> = self.data.iter().collect();
        data.sort_by_key(|e| e.index);
        data.into_iter().map(|e| e.embedding.as_slice()).collect()
    }
}
