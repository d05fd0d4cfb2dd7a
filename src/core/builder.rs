use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    config::Config,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
    tasks::WorkRef,
};
use super::managed::ManagedTask;

/// Builder for constructing a [`ManagedTask`] with optional features.
pub struct ManagedTaskBuilder {
    work: WorkRef,
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ManagedTaskBuilder {
    /// Creates a new builder for `work` with the default configuration.
    pub fn new(work: WorkRef) -> Self {
        Self {
            work,
            cfg: Config::default(),
            subscribers: Vec::new(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive lifecycle events through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the task.
    ///
    /// With subscribers, this spawns the fan-out listener and therefore must be
    /// called within a Tokio runtime. The listener drains and stops when the
    /// task is dropped.
    pub fn build(self) -> ManagedTask {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let listener = if subs.is_empty() {
            None
        } else {
            Some(spawn_listener(&bus, subs))
        };
        ManagedTask::new_internal(self.work, self.cfg, bus, listener)
    }
}

/// Forwards bus events to `subs` until the returned guard is dropped.
fn spawn_listener(bus: &Bus, subs: SubscriberSet) -> DropGuard {
    let mut rx = bus.subscribe();
    let closed = CancellationToken::new();
    let guard = closed.clone().drop_guard();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Ok(ev) => subs.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = closed.cancelled() => {
                    loop {
                        match rx.try_recv() {
                            Ok(ev) => subs.emit(&ev),
                            Err(TryRecvError::Lagged(_)) => continue,
                            Err(_) => break,
                        }
                    }
                    break;
                }
            }
        }
        subs.shutdown().await;
    });
    guard
}
