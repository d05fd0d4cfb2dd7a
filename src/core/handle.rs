//! # Completion and start handles.
//!
//! [`Completion`] is a cloneable handle on the outcome of the running work,
//! backed by [`futures::future::Shared`] over the spawned `JoinHandle`, so
//! `stop` and any number of callers can await the same result.
//!
//! [`StartHandle`] is what `start` returns: either the result of work that
//! finished during `start`, or a pending [`Completion`].

use futures::FutureExt;
use futures::future::{self, BoxFuture, Shared};
use tokio::task::JoinHandle;

use crate::error::{WorkError, WorkResult};

/// Cloneable handle resolving to the work's result.
#[derive(Clone)]
pub struct Completion {
    inner: Shared<BoxFuture<'static, WorkResult>>,
}

impl Completion {
    /// Wraps a spawned work task.
    ///
    /// A `JoinError` (the runtime dropped or aborted the task) maps to
    /// [`WorkError::Panicked`].
    pub(crate) fn spawned(join: JoinHandle<WorkResult>) -> Self {
        let fut = join
            .map(|res| match res {
                Ok(r) => r,
                Err(e) if e.is_panic() => Err(WorkError::from_panic(&*e.into_panic())),
                Err(e) => Err(WorkError::Panicked {
                    reason: e.to_string(),
                }),
            })
            .boxed();
        Self {
            inner: fut.shared(),
        }
    }

    /// A completion that is already resolved.
    pub(crate) fn ready(res: WorkResult) -> Self {
        Self {
            inner: future::ready(res).boxed().shared(),
        }
    }

    /// Waits for the work to finish and returns its result.
    pub async fn wait(&self) -> WorkResult {
        self.inner.clone().await
    }

    /// Returns the result if some waiter has already observed completion.
    pub fn peek(&self) -> Option<WorkResult> {
        self.inner.peek().cloned()
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("result", &self.peek())
            .finish()
    }
}

/// Result of `start`.
#[derive(Debug, Clone)]
pub enum StartHandle {
    /// The work finished before `start` returned.
    Completed(WorkResult),
    /// The work is running in the background.
    Pending(Completion),
}

impl StartHandle {
    /// `true` when the work finished during `start`.
    pub fn is_completed(&self) -> bool {
        matches!(self, StartHandle::Completed(_))
    }

    /// Waits for the work to finish (immediate for [`StartHandle::Completed`]).
    pub async fn wait(&self) -> WorkResult {
        match self {
            StartHandle::Completed(res) => res.clone(),
            StartHandle::Pending(c) => c.wait().await,
        }
    }
}
