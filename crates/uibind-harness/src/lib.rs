#![forbid(unsafe_code)]

//! Test harness for uibind.
//!
//! - [`RecordingObserver`]: an [`Observer`](uibind_core::Observer) that
//!   records every notification for later assertions.
//! - [`on_other_thread`]: run a closure on a fresh thread, for exercising
//!   the thread-affinity guard.
//! - [`capture_logs`]: collect `tracing` events emitted while a closure runs.
//! - [`strategies`]: `proptest` strategies for widget inputs.

pub mod logs;
pub mod recorder;
pub mod strategies;
pub mod thread;

pub use logs::{CapturedEvent, capture_logs};
pub use recorder::{Notification, RecordingObserver};
pub use thread::on_other_thread;
