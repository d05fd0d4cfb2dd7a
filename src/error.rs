//! Error types used by managed tasks and their work.
//!
//! This module defines two enums:
//!
//! - [`ServiceError`]: errors raised by the lifecycle operations themselves.
//! - [`WorkError`]: errors raised by the background work.
//!
//! Both provide `as_label` / `as_message` helpers for logs.

use thiserror::Error;

/// # Errors produced by lifecycle operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// `start` was called on a task that had already been started.
    ///
    /// The first operation stays tracked; the second call launches nothing.
    #[error("service {service:?} already started")]
    AlreadyStarted {
        /// Name of the service.
        service: String,
    },
}

impl ServiceError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use hosted_task::ServiceError;
    ///
    /// let err = ServiceError::AlreadyStarted { service: "poller".into() };
    /// assert_eq!(err.as_label(), "service_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ServiceError::AlreadyStarted { .. } => "service_already_started",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ServiceError::AlreadyStarted { service } => {
                format!("already started: {service}")
            }
        }
    }
}

/// # Errors produced by the background work.
///
/// `Clone` so that one completion result can be handed to every waiter.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkError {
    /// Work failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Work observed cancellation and chose to report it.
    #[error("context cancelled")]
    Canceled,

    /// Work panicked (or its runtime task was torn down).
    #[error("work panicked: {reason}")]
    Panicked {
        /// Panic payload, if it was a string.
        reason: String,
    },
}

impl WorkError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use hosted_task::WorkError;
    ///
    /// let err = WorkError::Fail { error: "boom".into() };
    /// assert_eq!(err.as_label(), "work_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkError::Fail { .. } => "work_failed",
            WorkError::Canceled => "work_canceled",
            WorkError::Panicked { .. } => "work_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WorkError::Fail { error } => format!("error: {error}"),
            WorkError::Canceled => "context cancelled".to_string(),
            WorkError::Panicked { reason } => format!("panic: {reason}"),
        }
    }

    /// Builds a [`WorkError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let reason = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        WorkError::Panicked { reason }
    }

    /// `true` when the work ended because it was asked to stop.
    pub fn is_canceled(&self) -> bool {
        matches!(self, WorkError::Canceled)
    }
}

/// Result of one execution of the background work.
pub type WorkResult = Result<(), WorkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(WorkError::Canceled.as_label(), "work_canceled");
        assert_eq!(
            WorkError::Panicked { reason: "x".into() }.as_label(),
            "work_panicked"
        );
    }

    #[test]
    fn panic_payloads_are_extracted() {
        let s: Box<dyn std::any::Any + Send> = Box::new("static boom");
        assert_eq!(
            WorkError::from_panic(s.as_ref()),
            WorkError::Panicked { reason: "static boom".into() }
        );

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(
            WorkError::from_panic(owned.as_ref()),
            WorkError::Panicked { reason: "owned boom".into() }
        );

        let other: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(
            WorkError::from_panic(other.as_ref()),
            WorkError::Panicked { reason: "unknown panic".into() }
        );
    }

    #[test]
    fn only_canceled_counts_as_a_stop() {
        assert!(WorkError::Canceled.is_canceled());
        assert!(!WorkError::Fail { error: "x".into() }.is_canceled());
        assert!(!WorkError::Panicked { reason: "x".into() }.is_canceled());
    }

    #[test]
    fn display_includes_details() {
        let err = ServiceError::AlreadyStarted { service: "poller".into() };
        assert_eq!(err.to_string(), "service \"poller\" already started");
        assert_eq!(err.as_message(), "already started: poller");
    }
}
