//! Embedding executor

use super::{PreparedRequest, decode_json, send};
use crate::client::ClientInner;
use crate::error::LlmError;
use crate::execution::transport::TransportBody;
use crate::types::{EmbeddingRequest, EmbeddingResult};
use validator::Validate;

pub const EMBEDDINGS_PATH: &str = "/embeddings";

pub(crate) async fn execute(
    inner: &ClientInner,
    req: &EmbeddingRequest,
) -> Result<EmbeddingResult, LlmError> {
    req.validate()?;
    let body = serde_json::to_value(req)?;
    let response = send(
        inner,
        PreparedRequest {
            operation: "embedding",
            model: &req.model,
            path: EMBEDDINGS_PATH,
            body: TransportBody::Json(body),
        },
    )
    .await?;
    decode_json(&response)
}
