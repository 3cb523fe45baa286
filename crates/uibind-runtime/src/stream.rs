#![forbid(unsafe_code)]

//! Bridge streams: subscribable factories keyed to one event source.
//!
//! A [`BridgeStream`] is assembled from injected functions rather than a
//! hand-written listener type per widget:
//!
//! - `attach(&source, emitter) -> K` installs a native listener that pushes
//!   into `emitter` and returns whatever `detach` needs (`()` for single-slot
//!   sources, a [`ListenerKey`](uibind_core::ListenerKey) for add/remove
//!   registration);
//! - `detach(&source, K)` removes that listener;
//! - `current(&source) -> T` (warm streams only) reads the present state.
//!
//! # Subscription sequence
//!
//! 1. Thread-affinity guard; on failure the observer gets one error and a
//!    disposed handle, and nothing is attached.
//! 2. A [`ListenerBridge`] is built and the observer receives its handle, so
//!    cancellation is possible before the first event.
//! 3. The listener is attached and the detach action installed.
//! 4. Warm streams forward `current(&source)` synchronously, after attaching.
//!
//! # Hazard: single-slot sources
//!
//! Most sources hold one listener per kind. Subscribing twice to the same
//! source silently supersedes the first subscription's listener, and
//! disposing the first subscription then clears the slot for both. Share one
//! subscription (or multicast downstream) instead.
//!
//! Every subscription keeps a strong reference to its source until disposed.

use std::fmt;
use std::sync::Arc;

use uibind_core::observer;
use uibind_core::{Disposable, EventSource, Observer, check_ui_thread};

use crate::bridge::{Emitter, ListenerBridge};

type AttachFn<S, T, K> = dyn Fn(&S, Emitter<T>) -> K + Send + Sync;
type DetachFn<S, K> = dyn Fn(&S, K) + Send + Sync;
type CurrentFn<S, T> = dyn Fn(&S) -> T + Send + Sync;

/// Something a downstream operator library can subscribe to.
pub trait Subscribe<T> {
    /// Subscribe `observer`, returning its cancellation handle.
    fn subscribe_boxed(&self, observer: Box<dyn Observer<T>>) -> Disposable;

    /// Whether each subscriber first receives the source's current state.
    fn is_warm(&self) -> bool;
}

/// Cold stream: emits only occurrences that happen after subscribing.
pub struct BridgeStream<S, T, K = ()> {
    source: S,
    attach: Arc<AttachFn<S, T, K>>,
    detach: Arc<DetachFn<S, K>>,
}

impl<S: Clone, T, K> Clone for BridgeStream<S, T, K> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            attach: Arc::clone(&self.attach),
            detach: Arc::clone(&self.detach),
        }
    }
}

impl<S, T, K> BridgeStream<S, T, K>
where
    S: EventSource,
    T: Send + 'static,
    K: Send + 'static,
{
    /// Build a stream from attach/detach functions.
    pub fn new(
        source: S,
        attach: impl Fn(&S, Emitter<T>) -> K + Send + Sync + 'static,
        detach: impl Fn(&S, K) + Send + Sync + 'static,
    ) -> Self {
        Self {
            source,
            attach: Arc::new(attach),
            detach: Arc::new(detach),
        }
    }

    /// Turn this into a warm stream that first emits `current(&source)`.
    pub fn with_initial(
        self,
        current: impl Fn(&S) -> T + Send + Sync + 'static,
    ) -> InitialValueStream<S, T, K> {
        InitialValueStream {
            stream: self,
            current: Arc::new(current),
        }
    }

    /// The event source this stream attaches to.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Subscribe `observer`.
    pub fn subscribe(&self, observer: impl Observer<T>) -> Disposable {
        self.subscribe_inner(observer, None)
    }

    /// Subscribe a closure receiving every value.
    pub fn subscribe_fn(&self, on_next: impl FnMut(T) + Send + 'static) -> Disposable {
        self.subscribe(observer::from_fn(on_next))
    }

    fn subscribe_inner(
        &self,
        mut observer: impl Observer<T>,
        current: Option<&CurrentFn<S, T>>,
    ) -> Disposable {
        if !check_ui_thread::<T, _>(self.source.ui_thread(), &mut observer) {
            return Disposable::disposed();
        }

        let bridge = Arc::new(ListenerBridge::new(observer));
        let handle = bridge.handle();
        bridge.subscribed();
        if handle.is_disposed() {
            #[cfg(feature = "tracing")]
            tracing::debug!("disposed during on_subscribe; not attaching");
            return handle;
        }

        let key = (self.attach)(&self.source, Emitter::new(Arc::clone(&bridge)));
        let source = self.source.clone();
        let detach = Arc::clone(&self.detach);
        handle.set_action(move || {
            detach(&source, key);
            #[cfg(feature = "tracing")]
            tracing::debug!("listener detached");
            Ok(())
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(warm = current.is_some(), "listener attached");

        if let Some(current) = current {
            bridge.emit(current(&self.source));
        }
        handle
    }
}

impl<S, T, K> Subscribe<T> for BridgeStream<S, T, K>
where
    S: EventSource,
    T: Send + 'static,
    K: Send + 'static,
{
    fn subscribe_boxed(&self, observer: Box<dyn Observer<T>>) -> Disposable {
        self.subscribe(observer)
    }

    fn is_warm(&self) -> bool {
        false
    }
}

impl<S: fmt::Debug, T, K> fmt::Debug for BridgeStream<S, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeStream")
            .field("source", &self.source)
            .finish()
    }
}

/// Warm stream: every subscriber first receives the source's current state.
///
/// The state is read fresh for each subscription, synchronously inside
/// `subscribe`, after the listener is attached. It is never cached.
pub struct InitialValueStream<S, T, K = ()> {
    stream: BridgeStream<S, T, K>,
    current: Arc<CurrentFn<S, T>>,
}

impl<S: Clone, T, K> Clone for InitialValueStream<S, T, K> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
            current: Arc::clone(&self.current),
        }
    }
}

impl<S, T, K> InitialValueStream<S, T, K>
where
    S: EventSource,
    T: Send + 'static,
    K: Send + 'static,
{
    /// Subscribe `observer`; it receives the current state before returning.
    pub fn subscribe(&self, observer: impl Observer<T>) -> Disposable {
        self.stream.subscribe_inner(observer, Some(&*self.current))
    }

    /// Subscribe a closure receiving every value, starting with the current state.
    pub fn subscribe_fn(&self, on_next: impl FnMut(T) + Send + 'static) -> Disposable {
        self.subscribe(observer::from_fn(on_next))
    }

    /// The equivalent cold stream, without the initial emission.
    #[must_use]
    pub fn skip_initial_value(&self) -> BridgeStream<S, T, K> {
        self.stream.clone()
    }

    /// Read the source's current state without subscribing.
    #[must_use]
    pub fn current_value(&self) -> T {
        (self.current)(&self.stream.source)
    }

    /// The event source this stream attaches to.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.stream.source
    }
}

impl<S, T, K> Subscribe<T> for InitialValueStream<S, T, K>
where
    S: EventSource,
    T: Send + 'static,
    K: Send + 'static,
{
    fn subscribe_boxed(&self, observer: Box<dyn Observer<T>>) -> Disposable {
        self.subscribe(observer)
    }

    fn is_warm(&self) -> bool {
        true
    }
}

impl<S: fmt::Debug, T, K> fmt::Debug for InitialValueStream<S, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitialValueStream")
            .field("source", &self.stream.source)
            .finish()
    }
}
