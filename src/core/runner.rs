//! # Run one execution of the background work.
//!
//! ```text
//! work.spawn(token) → Ok(()) / Err(Canceled) → publish WorkStopped
//!                   → Err(Fail)               → publish WorkFailed
//!                   → panic (caught)          → publish WorkFailed, Err(Panicked)
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal work event
//! - `Canceled` is a graceful exit, reported as `WorkStopped`
//! - A panic never escapes: `start` polls this future on the caller's stack

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{WorkError, WorkResult},
    events::{Bus, Event, EventKind},
    tasks::WorkRef,
};

/// Executes `work` once with `token`, publishing its terminal event to `bus`.
pub(crate) async fn run_work(work: WorkRef, token: CancellationToken, bus: Bus) -> WorkResult {
    let res = match AssertUnwindSafe(work.spawn(token)).catch_unwind().await {
        Ok(res) => res,
        Err(payload) => Err(WorkError::from_panic(&*payload)),
    };

    match &res {
        Err(e) if !e.is_canceled() => {
            bus.publish(
                Event::new(EventKind::WorkFailed)
                    .with_service(work.name())
                    .with_reason(e.to_string()),
            );
        }
        _ => bus.publish(Event::new(EventKind::WorkStopped).with_service(work.name())),
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::WorkFn;

    #[tokio::test]
    async fn failure_publishes_work_failed() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let work: WorkRef = WorkFn::arc("failing", |_ctx: CancellationToken| async {
            Err(WorkError::Fail {
                error: "disk full".into(),
            })
        });

        let res = run_work(work, CancellationToken::new(), bus).await;
        assert_eq!(
            res,
            Err(WorkError::Fail {
                error: "disk full".into()
            })
        );

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::WorkFailed);
        assert_eq!(ev.reason.as_deref(), Some("execution failed: disk full"));
    }

    #[tokio::test]
    async fn canceled_is_a_clean_stop() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let work: WorkRef = WorkFn::arc("cancel", |_ctx: CancellationToken| async {
            Err(WorkError::Canceled)
        });

        let res = run_work(work, CancellationToken::new(), bus).await;
        assert_eq!(res, Err(WorkError::Canceled));
        assert_eq!(rx.recv().await.expect("event").kind, EventKind::WorkStopped);
    }

    #[tokio::test]
    async fn panics_are_caught() {
        let bus = Bus::new(8);
        let work: WorkRef = WorkFn::arc("panicky", |_ctx: CancellationToken| async {
            if true {
                panic!("loop exploded");
            }
            Ok::<(), WorkError>(())
        });

        let res = run_work(work, CancellationToken::new(), bus).await;
        assert_eq!(
            res,
            Err(WorkError::Panicked {
                reason: "loop exploded".into()
            })
        );
    }
}
