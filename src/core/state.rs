//! # Lifecycle states and stop outcomes.
//!
//! ```text
//! Idle ──start──► Running ──stop──► Stopping ──race resolves──► Stopped
//!   │                │                  │                          │
//!   └────────────────┴──── dispose ─────┴──────────────────────────┴──► Disposed
//! ```
//!
//! `Disposed` is terminal: later `start`/`stop` calls leave it unchanged.

use std::fmt;

use crate::error::WorkResult;

/// Lifecycle state of a [`ManagedTask`](crate::ManagedTask).
///
/// Tracks which lifecycle calls have been made, not whether the work is still
/// executing: a task can be `Running` with work that already returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, `start` not called yet.
    Idle,
    /// `start` launched the work.
    Running,
    /// `stop` triggered cancellation and is waiting.
    Stopping,
    /// `stop` returned (completion or deadline).
    Stopped,
    /// `dispose` was called (or the task was dropped).
    Disposed,
}

impl Lifecycle {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Lifecycle::Idle => "idle",
            Lifecycle::Running => "running",
            Lifecycle::Stopping => "stopping",
            Lifecycle::Stopped => "stopped",
            Lifecycle::Disposed => "disposed",
        }
    }

    /// Applies a transition; `Disposed` never moves.
    pub(crate) fn advance(&mut self, to: Lifecycle) {
        if *self != Lifecycle::Disposed {
            *self = to;
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// How a call to `stop` resolved.
///
/// Informational only: `stop` returns in every case and never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// `start` was never called; nothing to wait for.
    NotStarted,
    /// The work finished before the deadline, with this result.
    Completed(WorkResult),
    /// The deadline fired first. The work may still be running.
    Abandoned,
}

impl StopOutcome {
    /// `true` unless the work was abandoned.
    pub fn is_graceful(&self) -> bool {
        !matches!(self, StopOutcome::Abandoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposed_is_terminal() {
        let mut s = Lifecycle::Running;
        s.advance(Lifecycle::Disposed);
        s.advance(Lifecycle::Stopping);
        s.advance(Lifecycle::Stopped);
        assert_eq!(s, Lifecycle::Disposed);
    }

    #[test]
    fn labels() {
        assert_eq!(Lifecycle::Stopping.to_string(), "stopping");
        assert!(StopOutcome::NotStarted.is_graceful());
        assert!(!StopOutcome::Abandoned.is_graceful());
    }
}
