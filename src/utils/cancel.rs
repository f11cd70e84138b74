//! Cancellation utilities
//!
//! Provides cancellation handles and the explicit pending-call handle returned
//! by the `spawn_*` client methods.

use crate::error::LlmError;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Futures observing this handle stop at their next
    /// poll; dropping the in-flight request closes the underlying connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `future` until it completes or cancellation is requested.
    ///
    /// Cancellation always wins over a result that is not ready yet and
    /// yields `LlmError::OperationCancelled`.
    pub async fn run<T, F>(&self, future: F) -> Result<T, LlmError>
    where
        F: Future<Output = Result<T, LlmError>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(LlmError::OperationCancelled),
            res = future => res,
        }
    }
}

/// An operation running on the caller's tokio runtime.
///
/// Completion is observed explicitly with [`PendingCall::join`].
#[derive(Debug)]
#[must_use = "a pending call does nothing useful unless joined"]
pub struct PendingCall<T> {
    handle: JoinHandle<Result<T, LlmError>>,
    cancel: CancelHandle,
}

impl<T: Send + 'static> PendingCall<T> {
    /// Spawn `future` onto the current tokio runtime.
    ///
    /// Panics if called outside a tokio runtime, like `tokio::spawn`.
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, LlmError>> + Send + 'static,
    {
        let cancel = CancelHandle::new();
        let observer = cancel.clone();
        let handle = tokio::spawn(async move { observer.run(future).await });
        Self { handle, cancel }
    }

    /// Request cancellation; a subsequent `join` yields `OperationCancelled`
    /// unless the call had already completed.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clonable handle for cancelling from elsewhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the call to complete.
    pub async fn join(self) -> Result<T, LlmError> {
        match self.handle.await {
            Ok(res) => res,
            Err(e) if e.is_cancelled() => Err(LlmError::OperationCancelled),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancel_wakes_pending_call_immediately() {
        let call: PendingCall<()> = PendingCall::spawn(futures::future::pending());
        tokio::task::yield_now().await;
        call.cancel();

        let out = tokio::time::timeout(Duration::from_millis(200), call.join())
            .await
            .expect("cancel should wake the joined task");
        assert!(matches!(out, Err(LlmError::OperationCancelled)));
    }

    #[tokio::test]
    async fn completed_call_joins_to_its_result() {
        let call = PendingCall::spawn(async { Ok::<_, LlmError>(42) });
        assert_eq!(call.join().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn run_returns_cancelled_when_already_cancelled() {
        let handle = CancelHandle::new();
        handle.cancel();
        let res = handle.run(async { Ok::<_, LlmError>(1) }).await;
        assert!(matches!(res, Err(LlmError::OperationCancelled)));
        assert!(handle.is_cancelled());
    }
}
