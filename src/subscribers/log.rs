//! # LogWriter: events to `tracing`
//!
//! A subscriber that writes incoming [`Event`]s as structured `tracing` records.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Levels
//! - `warn`: `DeadlineExceeded`, `WorkFailed`, `StartRejected`, subscriber overflow/panic
//! - `info`: start, stop and disposal
//! - `debug`: `ServiceStarting`, `StopRequested`

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let service = e.service.as_deref().unwrap_or("unknown");
        let reason = e.reason.as_deref();
        match e.kind {
            EventKind::ServiceStarting => {
                debug!(service, seq = e.seq, "starting");
            }
            EventKind::ServiceStarted => {
                info!(service, seq = e.seq, "started");
            }
            EventKind::CompletedOnStart => {
                info!(service, seq = e.seq, reason, "completed during start");
            }
            EventKind::StartRejected => {
                warn!(service, seq = e.seq, reason, "start rejected");
            }
            EventKind::StopRequested => {
                debug!(service, seq = e.seq, grace_ms = e.grace_ms, "stop requested");
            }
            EventKind::StoppedWithin => {
                info!(service, seq = e.seq, "stopped");
            }
            EventKind::DeadlineExceeded => {
                warn!(
                    service,
                    seq = e.seq,
                    grace_ms = e.grace_ms,
                    "deadline exceeded; work abandoned"
                );
            }
            EventKind::Disposed => {
                info!(service, seq = e.seq, "disposed");
            }
            EventKind::WorkStopped => {
                debug!(service, seq = e.seq, "work exited");
            }
            EventKind::WorkFailed => {
                warn!(service, seq = e.seq, reason, "work failed");
            }
            EventKind::SubscriberOverflow => {
                warn!(subscriber = service, reason, "subscriber overflow");
            }
            EventKind::SubscriberPanicked => {
                warn!(subscriber = service, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
