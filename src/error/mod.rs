//! Error Handling Module
//!
//! This module provides the error taxonomy for the client:
//! - Core error type (`LlmError`) and coarse classification (`ErrorCategory`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use foundry_client::error::{ErrorCategory, LlmError};
//!
//! let error = LlmError::service_error(404, "Not found", None);
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert_eq!(error.status_code(), Some(404));
//! ```

// Module declarations
mod conversions;
pub mod types;

// Re-exports for public API
pub use types::*;
