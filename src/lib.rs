//! # hosted-task
//!
//! **hosted-task** wraps a long-running async operation in a managed lifecycle:
//! start it, ask it to stop cooperatively, and wait for it to finish, but
//! never longer than the caller's deadline.
//!
//! It is the building block a process host drives: one [`ManagedTask`] per
//! background unit, each exposing the [`HostedService`] contract.
//!
//! ## Architecture
//! ```text
//!   host ──start(ctx)──────► ManagedTask ──tokio::spawn──► run_work(Work, stopping token)
//!        ──stop(deadline)──►     │                               │
//!        ──dispose()───────►     │ stopping.cancel()             │ checkpoint: cancelled? exit
//!                                │                               │            else sleep(interval)
//!                                ▼                               ▼
//!                 select! { completion, deadline }          Completion (shared)
//!
//!   ManagedTask, run_work ── publish(Event) ──► Bus ──► listener ──► SubscriberSet ──► LogWriter, ...
//! ```
//!
//! ### Lifecycle
//! ```text
//! Idle ──start──► Running ──stop──► Stopping ──► Stopped
//!   any state ──dispose / drop──► Disposed (terminal)
//! ```
//!
//! ## Features
//! | Area              | Description                                                    | Key types / traits                          |
//! |-------------------|----------------------------------------------------------------|---------------------------------------------|
//! | **Lifecycle**     | Start, deadline-bounded stop, idempotent dispose.              | [`ManagedTask`], [`HostedService`]          |
//! | **Handles**       | Distinguish finished-at-start from pending work.               | [`StartHandle`], [`Completion`]             |
//! | **Work**          | Define the background operation.                               | [`Work`], [`WorkFn`], [`PollingWork`]       |
//! | **Events**        | Observe lifecycle transitions.                                 | [`Event`], [`EventKind`], [`Subscribe`]     |
//! | **Logging**       | Lifecycle events as `tracing` records.                         | [`LogWriter`]                               |
//! | **Errors**        | Typed errors for lifecycle calls and work.                     | [`ServiceError`], [`WorkError`]             |
//! | **Configuration** | Poll interval, grace window, bus capacity.                     | [`Config`]                                  |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use hosted_task::{Config, LogWriter, ManagedTask, PollingWork, StopOutcome, Subscribe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default();
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!
//!     let task = ManagedTask::builder(Arc::new(PollingWork::with_config("poller", &cfg)))
//!         .with_config(cfg)
//!         .with_subscribers(subs)
//!         .build();
//!
//!     task.start(CancellationToken::new()).await?;
//!     tokio::time::sleep(Duration::from_millis(50)).await;
//!
//!     let outcome = task.stop_within(task.config().grace).await;
//!     assert_eq!(outcome, StopOutcome::Completed(Ok(())));
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::Config;
pub use crate::core::{
    Completion, HostedService, Lifecycle, ManagedTask, ManagedTaskBuilder, StartHandle,
    StopOutcome,
};
pub use error::{ServiceError, WorkError, WorkResult};
pub use events::{Event, EventKind};
pub use subscribers::{LogWriter, Subscribe};
pub use tasks::{BoxWorkFuture, PollingWork, Work, WorkFn, WorkRef};
