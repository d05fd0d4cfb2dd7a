//! # Placeholder polling loop.
//!
//! [`PollingWork`] does nothing but wait for its stopping token:
//!
//! ```text
//! loop {
//!   ├─► checkpoint += 1
//!   ├─► token cancelled? ─► exit Ok(())
//!   └─► sleep(interval)
//! }
//! ```
//!
//! Cancellation is therefore observed at most one `interval` after it is requested.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::tasks::work::{BoxWorkFuture, Work};

/// Work that polls its stopping token every `interval`.
#[derive(Debug)]
pub struct PollingWork {
    name: Cow<'static, str>,
    interval: Duration,
    checkpoints: Arc<AtomicU64>,
}

impl PollingWork {
    /// Creates a polling loop with an explicit interval (minimum 1ms).
    pub fn new(name: impl Into<Cow<'static, str>>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval: interval.max(Duration::from_millis(1)),
            checkpoints: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a polling loop using [`Config::poll_interval`].
    pub fn with_config(name: impl Into<Cow<'static, str>>, cfg: &Config) -> Self {
        Self::new(name, cfg.poll_interval_clamped())
    }

    /// Interval between checkpoints.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of checkpoints passed so far, across all executions.
    pub fn checkpoints(&self) -> u64 {
        self.checkpoints.load(Ordering::Relaxed)
    }
}

impl Work for PollingWork {
    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(&self, ctx: CancellationToken) -> BoxWorkFuture {
        let interval = self.interval;
        let checkpoints = Arc::clone(&self.checkpoints);
        Box::pin(async move {
            loop {
                checkpoints.fetch_add(1, Ordering::Relaxed);
                if ctx.is_cancelled() {
                    return Ok(());
                }
                tokio::time::sleep(interval).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn exits_immediately_when_already_cancelled() {
        let work = PollingWork::new("poll", Duration::from_secs(60));
        let token = CancellationToken::new();
        token.cancel();

        let res = tokio::time::timeout(Duration::from_millis(200), work.spawn(token))
            .await
            .expect("no sleep before the first checkpoint");
        assert_eq!(res, Ok(()));
        assert_eq!(work.checkpoints(), 1);
    }

    #[tokio::test]
    async fn observes_cancellation_within_one_interval() {
        let work = PollingWork::new("poll", Duration::from_millis(10));
        let token = CancellationToken::new();
        let handle = tokio::spawn(work.spawn(token.clone()));

        tokio::time::sleep(Duration::from_millis(35)).await;
        assert!(work.checkpoints() >= 2);

        let cancelled_at = Instant::now();
        token.cancel();
        let res = handle.await.expect("join");
        assert_eq!(res, Ok(()));
        assert!(cancelled_at.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let work = PollingWork::new("poll", Duration::ZERO);
        assert_eq!(work.interval(), Duration::from_millis(1));
    }
}
