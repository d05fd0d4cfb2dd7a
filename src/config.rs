//! # Managed task configuration.
//!
//! Provides [`Config`], the in-code settings for a [`ManagedTask`](crate::ManagedTask).
//!
//! ## Sentinel values
//! - `poll_interval = 0` → clamped to 1ms (a zero interval would spin)
//! - `bus_capacity = 0` → clamped to 1

use std::time::Duration;

/// Settings for a managed task.
///
/// ## Field semantics
/// - `poll_interval`: delay between two checkpoints of the polling work
/// - `grace`: default wait used by [`ManagedTask::stop_within`](crate::ManagedTask::stop_within) callers
/// - `bus_capacity`: event bus ring buffer size
#[derive(Clone, Debug)]
pub struct Config {
    /// Delay between two cancellation checkpoints.
    ///
    /// Cancellation is observed at most one interval after it is requested.
    pub poll_interval: Duration,

    /// Default graceful-shutdown window.
    ///
    /// Hosts typically pass this to `stop_within`. Past it, `stop` returns
    /// and the work is abandoned.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel.
    ///
    /// Subscribers lagging by more than this many events skip the oldest ones.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the poll interval clamped to a minimum of 1ms.
    #[inline]
    pub fn poll_interval_clamped(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `poll_interval = 10ms`
    /// - `grace = 5s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.poll_interval, Duration::from_millis(10));
        assert_eq!(cfg.grace, Duration::from_secs(5));
        assert_eq!(cfg.bus_capacity_clamped(), 1024);
    }

    #[test]
    fn zero_values_are_clamped() {
        let cfg = Config {
            poll_interval: Duration::ZERO,
            grace: Duration::ZERO,
            bus_capacity: 0,
        };
        assert_eq!(cfg.poll_interval_clamped(), Duration::from_millis(1));
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
