//! Chat completion executor

use super::{PreparedRequest, decode_json, send};
use crate::client::ClientInner;
use crate::error::LlmError;
use crate::execution::transport::TransportBody;
use crate::types::{ChatRequest, ChatResult};
use validator::Validate;

pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

pub(crate) async fn execute(inner: &ClientInner, req: &ChatRequest) -> Result<ChatResult, LlmError> {
    req.validate()?;
    let body = serde_json::to_value(req)?;
    let response = send(
        inner,
        PreparedRequest {
            operation: "chat",
            model: &req.model,
            path: CHAT_COMPLETIONS_PATH,
            body: TransportBody::Json(body),
        },
    )
    .await?;
    decode_json(&response)
}
