//! # Work abstraction.
//!
//! [`Work`] is the background operation a [`ManagedTask`](crate::ManagedTask) runs.
//! It receives the task's stopping [`CancellationToken`] and should check it at
//! its own checkpoints to stop cooperatively.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::WorkResult;

/// Boxed future returned by [`Work::spawn`].
pub type BoxWorkFuture = Pin<Box<dyn Future<Output = WorkResult> + Send + 'static>>;

/// Shared handle to a work implementation.
pub type WorkRef = Arc<dyn Work>;

/// # Asynchronous, cancelable background operation.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use hosted_task::{BoxWorkFuture, Work};
///
/// struct Heartbeat;
///
/// impl Work for Heartbeat {
///     fn name(&self) -> &str { "heartbeat" }
///
///     fn spawn(&self, ctx: CancellationToken) -> BoxWorkFuture {
///         Box::pin(async move {
///             while !ctx.is_cancelled() {
///                 tokio::time::sleep(Duration::from_millis(100)).await;
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Work: Send + Sync + 'static {
    /// Returns a stable, human-readable name.
    fn name(&self) -> &str;

    /// Creates the future for one execution.
    ///
    /// The future must not start doing anything until it is first polled.
    fn spawn(&self, ctx: CancellationToken) -> BoxWorkFuture;
}
