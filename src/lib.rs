//! # foundry-client
//!
//! A thin client for hosted inference APIs (Azure OpenAI / Azure AI Foundry
//! style endpoints) covering four operation kinds:
//!
//! - chat completions
//! - image generation
//! - audio transcription (multipart upload of a local file)
//! - embeddings
//!
#![deny(unsafe_code)]

//! ## Authentication
//!
//! A client carries exactly one [`Credential`]: a static API key, or a
//! [`TokenProvider`] that mints bearer tokens for a fixed scope. Tokens are
//! requested once per call, never reused by the client itself; caching belongs
//! to the provider (see [`auth::ClientSecretCredential`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foundry_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = InferenceClient::build(
//!         "https://my-resource.openai.azure.com/openai/v1",
//!         Credential::api_key("your-api-key"),
//!     )?;
//!
//!     let request = ChatRequest::new(
//!         "gpt-4o",
//!         vec![
//!             ChatMessage::system("You are a helpful assistant."),
//!             ChatMessage::user("Can you help me?"),
//!         ],
//!     );
//!     let result = client.chat(&request).await?;
//!     println!("{}", result.first_text().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! [`InferenceClient`] is cheap to clone and safe to share. The `spawn_*`
//! methods start a call on the runtime and return a [`PendingCall`] that can be
//! joined or cancelled later; [`BlockingInferenceClient`] offers a synchronous
//! convention for non-async callers.

pub mod auth;
pub mod blocking;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod execution;
pub mod executors;
pub mod types;
pub mod utils;

pub use auth::{ApiKeyPlacement, Credential, TokenProvider};
pub use blocking::BlockingInferenceClient;
pub use client::{ClientBuilder, InferenceClient};
pub use config::{AuthConfig, ClientConfig};
pub use endpoint::{Endpoint, UrlConfig};
pub use error::{ErrorCategory, LlmError};
pub use utils::{CancelHandle, PendingCall};

/// Commonly used items
pub mod prelude {
    pub use crate::auth::{
        ApiKeyPlacement, ClientSecretCredential, Credential, EnvTokenProvider, FnTokenProvider,
        StaticTokenProvider, TokenProvider,
    };
    pub use crate::blocking::BlockingInferenceClient;
    pub use crate::client::{ClientBuilder, InferenceClient};
    pub use crate::config::ClientConfig;
    pub use crate::error::LlmError;
    pub use crate::types::*;
    pub use crate::utils::{CancelHandle, PendingCall};
}
