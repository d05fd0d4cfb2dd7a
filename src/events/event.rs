//! # Lifecycle events emitted by managed tasks.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: start, stop request, race resolution, disposal
//! - **Work events**: how the background work itself ended
//! - **Subscriber events**: overflow and panics inside subscriber workers
//!
//! The [`Event`] struct carries metadata such as timestamps, service name,
//! reasons and the grace window.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use hosted_task::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::DeadlineExceeded)
//!     .with_service("poller")
//!     .with_reason("work still running")
//!     .with_grace(Duration::from_secs(5));
//!
//! assert_eq!(ev.kind, EventKind::DeadlineExceeded);
//! assert_eq!(ev.service.as_deref(), Some("poller"));
//! assert_eq!(ev.grace_ms, Some(5_000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `service`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `service`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Lifecycle events ===
    /// `start` accepted; the work is about to be polled for the first time.
    ///
    /// Sets:
    /// - `service`: service name
    ServiceStarting,

    /// The work is running in the background (start returned a pending handle).
    ///
    /// Sets:
    /// - `service`: service name
    ServiceStarted,

    /// The work finished during `start` itself (start returned a completed handle).
    ///
    /// Sets:
    /// - `service`: service name
    /// - `reason`: error text if the work failed
    CompletedOnStart,

    /// A second `start` was refused.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `reason`: error label
    StartRejected,

    /// `stop` triggered the stopping token and is now waiting.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `grace_ms`: wait budget, when known
    StopRequested,

    /// The work finished before the deadline.
    ///
    /// Sets:
    /// - `service`: service name
    StoppedWithin,

    /// The deadline fired first; the work is abandoned.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `grace_ms`: wait budget, when known
    DeadlineExceeded,

    /// The task was disposed (first call only).
    ///
    /// Sets:
    /// - `service`: service name
    Disposed,

    // === Work events ===
    /// Work ended cleanly (returned `Ok` or reported cancellation).
    ///
    /// Sets:
    /// - `service`: service name
    WorkStopped,

    /// Work ended with an error or a panic.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `reason`: error message
    WorkFailed,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the service (or subscriber), if applicable.
    pub service: Option<Arc<str>>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Grace window in milliseconds (compact).
    pub grace_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            service: None,
            reason: None,
            grace_ms: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a service name.
    #[inline]
    pub fn with_service(mut self, service: impl Into<Arc<str>>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Attaches a grace window (stored as milliseconds).
    #[inline]
    pub fn with_grace(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.grace_ms = Some(ms);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_service(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_service(subscriber)
            .with_reason(info)
    }
}
