#![forbid(unsafe_code)]

//! Listener-to-stream bridge for uibind.
//!
//! This crate turns single-slot listener registration points into
//! subscribable streams and setters into callable sinks:
//!
//! - [`ListenerBridge`] / [`Emitter`]: per-subscription adapter that forwards
//!   native callbacks to an [`Observer`](uibind_core::Observer) until disposed.
//! - [`BridgeStream`]: cold stream built from injected attach/detach functions.
//! - [`InitialValueStream`]: warm stream that replays the source's current
//!   state to each new subscriber.
//! - [`Sink`]: mutation wrapper with no subscription lifecycle.
//! - [`DisposeScope`]: disposes a group of subscriptions together.
//!
//! # Concurrency
//!
//! The bridge introduces no threads and never blocks on I/O. Subscription,
//! delivery, and disposal are expected on the source's UI thread; the
//! thread-affinity guard checks this once, at subscribe time. Disposal clears
//! the source's listener before `dispose()` returns. A native event already
//! in flight when disposal lands is dropped, never delivered through a
//! half-released bridge.

pub mod bridge;
pub mod scope;
pub mod sink;
pub mod stream;

pub use bridge::{Emitter, Handled, ListenerBridge, always_handled, handled_when};
pub use scope::DisposeScope;
pub use sink::Sink;
pub use stream::{BridgeStream, InitialValueStream, Subscribe};
