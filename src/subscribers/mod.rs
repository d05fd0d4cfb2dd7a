//! # Event subscribers for managed tasks.
//!
//! ## Architecture
//! ```text
//!   ManagedTask ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit(&Event)
//!                                                             ├──► [queue] ──► LogWriter
//!                                                             └──► [queue] ──► custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use hosted_task::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct Abandonments;
//!
//! #[async_trait]
//! impl Subscribe for Abandonments {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::DeadlineExceeded {
//!             // page someone
//!         }
//!     }
//! }
//! ```

mod log;
mod set;
mod subscribe;

pub use log::LogWriter;
pub(crate) use set::SubscriberSet;
pub use subscribe::Subscribe;
