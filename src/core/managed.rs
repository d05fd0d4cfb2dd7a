//! # ManagedTask: start, stop and dispose a background work.
//!
//! A [`ManagedTask`] owns one [`Work`](crate::Work), its stopping
//! [`CancellationToken`] and, once started, the work's [`Completion`].
//!
//! ## Lifecycle
//! ```text
//! start(ctx)
//!   ├─► reserve (second call → AlreadyStarted)
//!   ├─► publish ServiceStarting
//!   ├─► poll run_work() once in place
//!   │     ├─ Ready   ─► StartHandle::Completed(result)   publish CompletedOnStart
//!   │     └─ Pending ─► tokio::spawn, StartHandle::Pending   publish ServiceStarted
//!   └─► store Completion
//!
//! stop(deadline)
//!   ├─► start never called ─► NotStarted
//!   ├─► start still polling  ─► cancel, wait for the Completion (or the deadline)
//!   ├─► stopping.cancel()            (idempotent, always followed by the wait)
//!   ├─► publish StopRequested
//!   └─► select! { biased;
//!         completion ─► Completed(result)   publish StoppedWithin
//!         deadline   ─► Abandoned           publish DeadlineExceeded
//!       }
//!
//! dispose() / drop
//!   └─► stopping.cancel(), state = Disposed   publish Disposed (first call only)
//! ```
//!
//! ## Rules
//! - The work only sees the task's own stopping token, never the caller's tokens.
//! - `stop` never waits past its deadline; abandoned work is not killed.
//! - `dispose` is safe in any state and any number of times.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    config::Config,
    error::ServiceError,
    events::{Bus, Event, EventKind},
    tasks::{PollingWork, WorkRef},
};
use super::{
    builder::ManagedTaskBuilder,
    handle::{Completion, StartHandle},
    hosted::HostedService,
    runner::run_work,
    state::{Lifecycle, StopOutcome},
};

/// Mutable part of a managed task.
struct Inner {
    state: Lifecycle,
    /// Set by the first `start`, before the work is polled.
    started: bool,
    /// Written once by `start`, read by `stop`.
    completion: Option<Completion>,
}

/// Background work with graceful start/stop semantics.
///
/// ## Example
/// ```rust
/// use hosted_task::{Config, ManagedTask, StopOutcome};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let task = ManagedTask::polling("poller", Config::default());
///
///     let handle = task.start(CancellationToken::new()).await?;
///     assert!(!handle.is_completed());
///
///     let outcome = task.stop(CancellationToken::new()).await;
///     assert_eq!(outcome, StopOutcome::Completed(Ok(())));
///     Ok(())
/// }
/// ```
pub struct ManagedTask {
    work: WorkRef,
    cfg: Config,
    bus: Bus,
    stopping: CancellationToken,
    inner: Mutex<Inner>,
    /// Wakes `stop` calls that arrived while `start` was polling the work.
    stored: Notify,
    /// Stops the subscriber listener after `Drop` has published `Disposed`.
    _listener: Option<DropGuard>,
}

impl ManagedTask {
    /// Creates a task for `work` with the default configuration and no subscribers.
    pub fn new(work: WorkRef) -> Self {
        Self::builder(work).build()
    }

    /// Creates a task running [`PollingWork`] at `cfg.poll_interval`.
    pub fn polling(name: impl Into<std::borrow::Cow<'static, str>>, cfg: Config) -> Self {
        let work = Arc::new(PollingWork::with_config(name, &cfg));
        Self::builder(work).with_config(cfg).build()
    }

    /// Returns a builder for `work`.
    pub fn builder(work: WorkRef) -> ManagedTaskBuilder {
        ManagedTaskBuilder::new(work)
    }

    pub(crate) fn new_internal(
        work: WorkRef,
        cfg: Config,
        bus: Bus,
        listener: Option<DropGuard>,
    ) -> Self {
        Self {
            work,
            cfg,
            bus,
            stopping: CancellationToken::new(),
            inner: Mutex::new(Inner {
                state: Lifecycle::Idle,
                started: false,
                completion: None,
            }),
            stored: Notify::new(),
            _listener: listener,
        }
    }

    /// Name of the underlying work.
    pub fn name(&self) -> &str {
        self.work.name()
    }

    /// Configuration this task was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.lock().state
    }

    /// `true` once `start` has been accepted.
    pub fn is_started(&self) -> bool {
        self.lock().started
    }

    /// A clone of the stopping token, for observation.
    ///
    /// Cancelling it has the same effect on the work as `stop` without the wait.
    pub fn stopping_token(&self) -> CancellationToken {
        self.stopping.clone()
    }

    /// Launches the work.
    ///
    /// The work future is polled once before this returns. If it is already
    /// finished (e.g. the task was disposed before being started) the handle is
    /// [`StartHandle::Completed`] with the real result; otherwise the work is
    /// spawned and the handle is [`StartHandle::Pending`].
    ///
    /// `_ctx` only aborts the start step, which has no waits here.
    ///
    /// ### Errors
    /// [`ServiceError::AlreadyStarted`] on a second call. The first work stays tracked.
    ///
    /// ### Panics
    /// If the work does not finish on its first poll, it is spawned with
    /// [`tokio::spawn`], which panics outside a Tokio runtime.
    pub async fn start(&self, _ctx: CancellationToken) -> Result<StartHandle, ServiceError> {
        {
            let mut inner = self.lock();
            if inner.started {
                drop(inner);
                let err = ServiceError::AlreadyStarted {
                    service: self.name().to_string(),
                };
                self.publish(Event::new(EventKind::StartRejected).with_reason(err.as_label()));
                return Err(err);
            }
            inner.started = true;
            inner.state.advance(Lifecycle::Running);
        }
        self.publish(Event::new(EventKind::ServiceStarting));

        let mut fut = Box::pin(run_work(
            Arc::clone(&self.work),
            self.stopping.clone(),
            self.bus.clone(),
        ));
        // The spawned task re-polls with its own waker.
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());

        let (handle, completion) = match fut.as_mut().poll(&mut cx) {
            Poll::Ready(res) => {
                let mut ev = Event::new(EventKind::CompletedOnStart);
                if let Err(e) = &res {
                    ev = ev.with_reason(e.to_string());
                }
                self.publish(ev);
                (StartHandle::Completed(res.clone()), Completion::ready(res))
            }
            Poll::Pending => {
                let completion = Completion::spawned(tokio::spawn(fut));
                self.publish(Event::new(EventKind::ServiceStarted));
                (StartHandle::Pending(completion.clone()), completion)
            }
        };

        self.lock().completion = Some(completion);
        self.stored.notify_waiters();
        Ok(handle)
    }

    /// Requests a graceful stop and waits until the work finishes or `deadline` is cancelled.
    ///
    /// Returns [`StopOutcome::NotStarted`] right away if `start` was never called.
    /// A `stop` racing a `start` that is still polling the work cancels it and
    /// waits for the completion to be stored.
    /// If the work and the deadline are both ready, the work wins.
    pub async fn stop(&self, deadline: CancellationToken) -> StopOutcome {
        self.stop_until(deadline.cancelled(), None).await
    }

    /// Like [`stop`](Self::stop), with a deadline `grace` from now.
    pub async fn stop_within(&self, grace: Duration) -> StopOutcome {
        self.stop_until(tokio::time::sleep(grace), Some(grace)).await
    }

    async fn stop_until<D>(&self, deadline: D, grace: Option<Duration>) -> StopOutcome
    where
        D: Future<Output = ()>,
    {
        tokio::pin!(deadline);

        let completion = loop {
            let stored = self.stored.notified();
            tokio::pin!(stored);
            stored.as_mut().enable();
            {
                let mut inner = self.lock();
                if !inner.started {
                    return StopOutcome::NotStarted;
                }
                inner.state.advance(Lifecycle::Stopping);
                if let Some(completion) = inner.completion.clone() {
                    break Some(completion);
                }
            }
            // `start` is still polling the work for the first time.
            self.stopping.cancel();
            tokio::select! {
                biased;
                _ = &mut stored => continue,
                _ = &mut deadline => break None,
            }
        };

        // Infallible and idempotent; the wait below runs regardless.
        self.stopping.cancel();
        let mut ev = Event::new(EventKind::StopRequested);
        if let Some(g) = grace {
            ev = ev.with_grace(g);
        }
        self.publish(ev);

        let outcome = match completion {
            Some(completion) => tokio::select! {
                biased;
                res = completion.wait() => StopOutcome::Completed(res),
                _ = &mut deadline => StopOutcome::Abandoned,
            },
            None => StopOutcome::Abandoned,
        };

        self.lock().state.advance(Lifecycle::Stopped);
        let mut ev = match outcome {
            StopOutcome::Abandoned => Event::new(EventKind::DeadlineExceeded)
                .with_reason("work did not finish before the deadline"),
            _ => Event::new(EventKind::StoppedWithin),
        };
        if let Some(g) = grace {
            ev = ev.with_grace(g);
        }
        self.publish(ev);
        outcome
    }

    /// Cancels the stopping token and marks the task disposed.
    ///
    /// Safe in any state; repeated calls are no-ops.
    pub fn dispose(&self) {
        self.stopping.cancel();
        let first = {
            let mut inner = self.lock();
            let first = inner.state != Lifecycle::Disposed;
            inner.state = Lifecycle::Disposed;
            first
        };
        if first {
            self.publish(Event::new(EventKind::Disposed));
        }
    }

    fn publish(&self, ev: Event) {
        self.bus.publish(ev.with_service(self.name()));
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ManagedTask {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for ManagedTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedTask")
            .field("name", &self.name())
            .field("state", &self.state())
            .field("cancelled", &self.stopping.is_cancelled())
            .finish()
    }
}

#[async_trait]
impl HostedService for ManagedTask {
    fn name(&self) -> &str {
        ManagedTask::name(self)
    }

    async fn start(&self, ctx: CancellationToken) -> Result<StartHandle, ServiceError> {
        ManagedTask::start(self, ctx).await
    }

    async fn stop(&self, deadline: CancellationToken) -> StopOutcome {
        ManagedTask::stop(self, deadline).await
    }
}
