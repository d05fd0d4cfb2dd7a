//! Managed task core: lifecycle, handles, and wiring.
//!
//! Internal modules:
//! - [`managed`]: the [`ManagedTask`] start / stop / dispose lifecycle;
//! - [`handle`]: shared completion handle and start result;
//! - [`state`]: lifecycle states and stop outcomes;
//! - [`runner`]: executes the work once with event publishing;
//! - [`builder`]: config, bus and subscriber wiring;
//! - [`hosted`]: the host-facing lifecycle trait.

mod builder;
mod handle;
mod hosted;
mod managed;
mod runner;
mod state;

pub use builder::ManagedTaskBuilder;
pub use handle::{Completion, StartHandle};
pub use hosted::HostedService;
pub use managed::ManagedTask;
pub use state::{Lifecycle, StopOutcome};
