//! # Host-facing lifecycle contract.
//!
//! [`HostedService`] is what a generic process host drives: start every
//! service, wait for a shutdown request, then stop each one within a grace
//! window. [`ManagedTask`](crate::ManagedTask) implements it.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::handle::StartHandle;
use crate::core::state::StopOutcome;
use crate::error::ServiceError;

/// A background unit with graceful start/stop semantics.
#[async_trait]
pub trait HostedService: Send + Sync + 'static {
    /// Stable, human-readable name.
    fn name(&self) -> &str;

    /// Launches the service.
    ///
    /// `ctx` signals that the *start* step itself should be aborted; it is not
    /// the stopping signal of the running work.
    async fn start(&self, ctx: CancellationToken) -> Result<StartHandle, ServiceError>;

    /// Requests a graceful stop and waits until the work finishes or `deadline` fires.
    async fn stop(&self, deadline: CancellationToken) -> StopOutcome;
}
