//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging observers into a managed
//! task. Each subscriber is driven by a dedicated worker loop fed by a bounded
//! queue owned by the task's subscriber set.
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching) – they do **not** block
//!   the lifecycle operations nor other subscribers.
//! - If a queue overflows, events for that subscriber are **dropped**.

use crate::events::Event;
use async_trait::async_trait;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker task. Implementations should avoid
/// blocking the async runtime.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
