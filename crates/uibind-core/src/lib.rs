#![forbid(unsafe_code)]

//! Core contracts for bridging single-slot UI listeners to push streams.
//!
//! This crate provides the pieces every binding is assembled from:
//!
//! - [`Disposable`]: idempotent cancellation handle for one subscription.
//! - [`Observer`]: the downstream consumer contract (`on_subscribe`,
//!   `on_next`, `on_error`).
//! - [`check_ui_thread`]: the thread-affinity guard run at subscribe time.
//! - [`ListenerSlot`] / [`ListenerList`]: the registration points that event
//!   sources expose to listeners.
//! - [`BindError`]: the error taxonomy surfaced to subscribers.
//! - [`config`]: process-wide settings (thread-check enforcement).
//!
//! The bridge itself (attach, forward, detach) lives in `uibind-runtime`.

pub mod config;
pub mod disposable;
pub mod error;
pub mod observer;
pub mod slot;
pub mod sync;
pub mod thread;

pub use config::{BindConfig, ConfigError, ThreadCheck};
pub use disposable::Disposable;
pub use error::{BindError, BoxError};
pub use observer::{FnObserver, Observer};
pub use slot::{ListenerKey, ListenerList, ListenerSlot};
pub use thread::{EventSource, UiThread, check_ui_thread};
