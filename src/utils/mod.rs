//! Utility Module

pub mod cancel;

pub use cancel::{CancelHandle, PendingCall};
