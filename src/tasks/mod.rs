//! # Work abstractions.
//!
//! - [`Work`] - trait for async cancelable background operations
//! - [`WorkFn`] - closure-backed work
//! - [`PollingWork`] - placeholder loop checking its token every interval
//! - [`WorkRef`] - shared reference to a work (`Arc<dyn Work>`)

mod polling;
mod work;
mod work_fn;

pub use polling::PollingWork;
pub use work::{BoxWorkFuture, Work, WorkRef};
pub use work_fn::WorkFn;
