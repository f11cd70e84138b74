//! Image generation executor

use super::{PreparedRequest, decode_json, send};
use crate::client::ClientInner;
use crate::error::LlmError;
use crate::execution::transport::TransportBody;
use crate::types::{ImageRequest, ImageResult};
use validator::Validate;

pub const IMAGE_GENERATIONS_PATH: &str = "/images/generations";

pub(crate) async fn execute(
    inner: &ClientInner,
    req: &ImageRequest,
) -> Result<ImageResult, LlmError> {
    req.validate()?;
    let body = serde_json::to_value(req)?;
    let response = send(
        inner,
        PreparedRequest {
            operation: "image",
            model: &req.model,
            path: IMAGE_GENERATIONS_PATH,
            body: TransportBody::Json(body),
        },
    )
    .await?;
    decode_json(&response)
}
