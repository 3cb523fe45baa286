#![forbid(unsafe_code)]

//! Listener bridge: couples one attached listener to one downstream observer.
//!
//! A [`ListenerBridge`] is created per subscription. Native listeners never
//! see it directly; they capture an [`Emitter`], a cheap clone-able capability
//! that forwards values into the bridge.
//!
//! # Invariants
//!
//! 1. Nothing is forwarded once the bridge's [`Disposable`] is disposed.
//!    Late native events are dropped silently.
//! 2. At most one `on_error` reaches the observer, and the bridge disposes
//!    itself right after delivering it.
//! 3. The observer is never invoked re-entrantly. A value emitted on the
//!    same bridge while the observer is still running is queued and
//!    delivered, in order, once the running call returns.
//! 4. Construction is side-effect free; attaching is a separate step.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Late event | Native callback after `dispose()` | Dropped, no error |
//! | Predicate error | "handled" callback returned `Err` | Value, `on_error`, dispose; `false` |
//! | Re-entrant event | Observer triggers the same listener | Queued behind the running call |
//! | Dispose while queued | Observer disposes with events still queued | Queued events dropped |

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use uibind_core::sync::lock;
use uibind_core::{BindError, BoxError, Disposable, Observer};

/// Caller-supplied decision on whether a native occurrence was consumed.
///
/// Evaluated per occurrence on the forwarded payload. Its result is returned
/// to the native layer (e.g. "was this long-press handled?").
pub type Handled<T> = Arc<dyn Fn(&T) -> Result<bool, BoxError> + Send + Sync>;

/// A [`Handled`] callback that always reports the occurrence as consumed.
#[must_use]
pub fn always_handled<T>() -> Handled<T> {
    Arc::new(|_| Ok(true))
}

/// A [`Handled`] callback built from an infallible predicate.
pub fn handled_when<T>(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Handled<T> {
    Arc::new(move |value| Ok(predicate(value)))
}

enum Signal<T> {
    Subscribe(Disposable),
    Next(T),
    Error(BindError),
}

/// Per-subscription adapter between a native listener and an observer.
pub struct ListenerBridge<T> {
    handle: Disposable,
    observer: Mutex<Box<dyn Observer<T>>>,
    delivering: Mutex<Option<ThreadId>>,
    queued: Mutex<VecDeque<Signal<T>>>,
}

/// Clears the in-delivery marker even if the observer panics.
struct Delivery<'a> {
    marker: &'a Mutex<Option<ThreadId>>,
}

impl Drop for Delivery<'_> {
    fn drop(&mut self) {
        *lock(self.marker) = None;
    }
}

impl<T: 'static> ListenerBridge<T> {
    /// Create a bridge for `observer`. Nothing is attached yet.
    pub fn new(observer: impl Observer<T>) -> Self {
        Self {
            handle: Disposable::empty(),
            observer: Mutex::new(Box::new(observer)),
            delivering: Mutex::new(None),
            queued: Mutex::new(VecDeque::new()),
        }
    }

    /// The subscription's cancellation handle.
    #[must_use]
    pub fn handle(&self) -> Disposable {
        self.handle.clone()
    }

    /// Whether the subscription has been disposed.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.handle.is_disposed()
    }

    /// Hand the observer its handle. Called once by the stream before attaching.
    pub(crate) fn subscribed(&self) {
        self.dispatch(Signal::Subscribe(self.handle.clone()));
    }

    /// Forward `value` unless the bridge is disposed.
    ///
    /// Returns whether the value was accepted: delivered now, or queued
    /// behind an observer call already running on this thread.
    pub fn emit(&self, value: T) -> bool {
        if self.is_disposed() {
            #[cfg(feature = "tracing")]
            tracing::trace!("late event dropped after dispose");
            return false;
        }
        self.dispatch(Signal::Next(value))
    }

    /// Forward `value`, then report the caller's consumption decision.
    ///
    /// The predicate runs on every occurrence, after the value has been
    /// forwarded. If it fails, the observer receives a terminal
    /// [`BindError::Callback`] after the value, the bridge disposes itself,
    /// and `false` is returned. A disposed bridge returns `false` without
    /// evaluating anything.
    pub fn emit_handled<F>(&self, value: T, handled: F) -> bool
    where
        T: Clone,
        F: FnOnce(&T) -> Result<bool, BoxError>,
    {
        if self.is_disposed() {
            return false;
        }
        self.emit(value.clone());
        match handled(&value) {
            Ok(consumed) => consumed,
            Err(err) => {
                self.fail(BindError::callback(err));
                false
            }
        }
    }

    /// Deliver a terminal failure, then dispose. No-op once disposed.
    pub fn fail(&self, error: BindError) {
        if self.is_disposed() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(%error, "bridge failed; disposing");
        self.dispatch(Signal::Error(error));
    }

    fn dispatch(&self, signal: Signal<T>) -> bool {
        let me = thread::current().id();
        if *lock(&self.delivering) == Some(me) {
            #[cfg(feature = "tracing")]
            tracing::trace!("re-entrant event queued");
            lock(&self.queued).push_back(signal);
            return true;
        }
        let mut observer = lock(&self.observer);
        // A dispose may have landed while waiting for the observer.
        if self.is_disposed() {
            return false;
        }
        *lock(&self.delivering) = Some(me);
        let _delivery = Delivery {
            marker: &self.delivering,
        };
        let mut next = Some(signal);
        while let Some(signal) = next {
            match signal {
                Signal::Subscribe(handle) => observer.on_subscribe(handle),
                Signal::Next(value) => observer.on_next(value),
                Signal::Error(error) => {
                    observer.on_error(error);
                    self.handle.dispose();
                }
            }
            next = self.next_queued();
        }
        true
    }

    fn next_queued(&self) -> Option<Signal<T>> {
        let mut queued = lock(&self.queued);
        if self.is_disposed() {
            if !queued.is_empty() {
                #[cfg(feature = "tracing")]
                tracing::trace!(count = queued.len(), "queued events dropped after dispose");
                queued.clear();
            }
            return None;
        }
        queued.pop_front()
    }
}

impl<T> fmt::Debug for ListenerBridge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBridge")
            .field("disposed", &self.handle.is_disposed())
            .finish()
    }
}

/// Capability captured by native listeners to push values into a bridge.
pub struct Emitter<T> {
    bridge: Arc<ListenerBridge<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            bridge: Arc::clone(&self.bridge),
        }
    }
}

impl<T: 'static> Emitter<T> {
    pub(crate) fn new(bridge: Arc<ListenerBridge<T>>) -> Self {
        Self { bridge }
    }

    /// See [`ListenerBridge::emit`].
    pub fn emit(&self, value: T) -> bool {
        self.bridge.emit(value)
    }

    /// See [`ListenerBridge::emit_handled`].
    pub fn emit_handled(&self, value: T, handled: &Handled<T>) -> bool
    where
        T: Clone,
    {
        self.bridge.emit_handled(value, |v| handled(v))
    }

    /// See [`ListenerBridge::fail`].
    pub fn fail(&self, error: BindError) {
        self.bridge.fail(error);
    }

    /// Whether the subscription has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.bridge.is_disposed()
    }

    /// The subscription's cancellation handle.
    #[must_use]
    pub fn handle(&self) -> Disposable {
        self.bridge.handle()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Emitter").field(&self.bridge).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Log {
        subscribed: usize,
        values: Vec<i32>,
        errors: Vec<String>,
    }

    struct Recorder(Arc<Mutex<Log>>);

    impl Observer<i32> for Recorder {
        fn on_subscribe(&mut self, _: Disposable) {
            self.0.lock().unwrap().subscribed += 1;
        }
        fn on_next(&mut self, value: i32) {
            self.0.lock().unwrap().values.push(value);
        }
        fn on_error(&mut self, error: BindError) {
            self.0.lock().unwrap().errors.push(error.to_string());
        }
    }

    fn bridge() -> (Arc<Mutex<Log>>, Arc<ListenerBridge<i32>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        let bridge = Arc::new(ListenerBridge::new(Recorder(Arc::clone(&log))));
        (log, bridge)
    }

    #[test]
    fn construction_has_no_side_effects() {
        let (log, bridge) = bridge();
        assert!(!bridge.is_disposed());
        assert_eq!(log.lock().unwrap().subscribed, 0);
        bridge.subscribed();
        assert_eq!(log.lock().unwrap().subscribed, 1);
    }

    #[test]
    fn emit_forwards_until_disposed() {
        let (log, bridge) = bridge();
        assert!(bridge.emit(1));
        bridge.handle().dispose();
        assert!(!bridge.emit(2));
        assert_eq!(log.lock().unwrap().values, vec![1]);
    }

    #[test]
    fn handled_false_still_forwards() {
        let (log, bridge) = bridge();
        let consumed = bridge.emit_handled(5, |_| Ok(false));
        assert!(!consumed);
        assert_eq!(log.lock().unwrap().values, vec![5]);
    }

    #[test]
    fn handled_predicate_sees_payload() {
        let (_, bridge) = bridge();
        assert!(bridge.emit_handled(4, |v| Ok(*v % 2 == 0)));
        assert!(!bridge.emit_handled(3, |v| Ok(*v % 2 == 0)));
    }

    #[test]
    fn handled_error_is_terminal() {
        let (log, bridge) = bridge();
        let consumed = bridge.emit_handled(1, |_| Err("nope".into()));
        assert!(!consumed);
        assert!(bridge.is_disposed());
        assert!(!bridge.emit(2));
        let log = log.lock().unwrap();
        assert_eq!(log.values, vec![1]);
        assert_eq!(log.errors, vec!["listener callback failed: nope".to_string()]);
    }

    #[test]
    fn handled_predicate_runs_after_forwarding() {
        let (log, bridge) = bridge();
        let seen_first = Arc::clone(&log);
        let consumed =
            bridge.emit_handled(7, move |_| Ok(seen_first.lock().unwrap().values == vec![7]));
        assert!(consumed);
    }

    #[test]
    fn disposed_bridge_skips_predicate() {
        let (_, bridge) = bridge();
        bridge.handle().dispose();
        let consumed = bridge.emit_handled(1, |_| panic!("predicate must not run"));
        assert!(!consumed);
    }

    #[test]
    fn fail_delivers_once() {
        let (log, bridge) = bridge();
        bridge.fail(BindError::invalid_argument("first"));
        bridge.fail(BindError::invalid_argument("second"));
        assert_eq!(log.lock().unwrap().errors, vec!["first".to_string()]);
    }

    /// Echoes each value below 100 back into its own bridge, then optionally
    /// disposes or fails from inside `on_next`.
    struct Echo {
        emitter: Arc<Mutex<Option<Emitter<i32>>>>,
        seen: Arc<Mutex<Vec<i32>>>,
        errors: Arc<Mutex<usize>>,
        then: Option<fn(&Emitter<i32>)>,
    }

    impl Observer<i32> for Echo {
        fn on_next(&mut self, value: i32) {
            self.seen.lock().unwrap().push(value);
            if value >= 100 {
                return;
            }
            let emitter = self.emitter.lock().unwrap().clone();
            if let Some(emitter) = emitter {
                assert!(emitter.emit(value + 100));
                if let Some(then) = self.then {
                    then(&emitter);
                }
            }
        }
        fn on_error(&mut self, _: BindError) {
            *self.errors.lock().unwrap() += 1;
        }
    }

    type EchoParts = (Arc<Mutex<Vec<i32>>>, Arc<Mutex<usize>>, Emitter<i32>);

    fn echo(then: Option<fn(&Emitter<i32>)>) -> EchoParts {
        let slot = Arc::new(Mutex::new(None));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(0));
        let bridge = Arc::new(ListenerBridge::new(Echo {
            emitter: Arc::clone(&slot),
            seen: Arc::clone(&seen),
            errors: Arc::clone(&errors),
            then,
        }));
        let emitter = Emitter::new(bridge);
        *slot.lock().unwrap() = Some(emitter.clone());
        (seen, errors, emitter)
    }

    #[test]
    fn reentrant_emit_is_queued_in_order() {
        let (seen, errors, emitter) = echo(None);
        assert!(emitter.emit(1));
        assert!(emitter.emit(2));
        assert_eq!(*seen.lock().unwrap(), vec![1, 101, 2, 102]);
        assert_eq!(*errors.lock().unwrap(), 0);
    }

    #[test]
    fn dispose_drops_queued_events() {
        let (seen, _, emitter) = echo(Some(|e: &Emitter<i32>| e.handle().dispose()));
        assert!(emitter.emit(1));
        assert!(!emitter.emit(2));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn reentrant_failure_follows_queued_values() {
        let (seen, errors, emitter) = echo(Some(|e: &Emitter<i32>| {
            e.fail(BindError::invalid_argument("late failure"));
        }));
        assert!(emitter.emit(1));
        assert!(emitter.is_disposed());
        assert_eq!(*seen.lock().unwrap(), vec![1, 101]);
        assert_eq!(*errors.lock().unwrap(), 1);
    }

    #[test]
    fn dispose_from_inside_on_next_drops_followups() {
        struct SelfDisposing {
            handle: Option<Disposable>,
            seen: Arc<Mutex<Vec<i32>>>,
        }
        impl Observer<i32> for SelfDisposing {
            fn on_subscribe(&mut self, handle: Disposable) {
                self.handle = Some(handle);
            }
            fn on_next(&mut self, value: i32) {
                self.seen.lock().unwrap().push(value);
                if let Some(handle) = &self.handle {
                    handle.dispose();
                }
            }
            fn on_error(&mut self, _: BindError) {}
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let bridge = ListenerBridge::new(SelfDisposing {
            handle: None,
            seen: Arc::clone(&seen),
        });
        bridge.subscribed();
        assert!(bridge.emit(1));
        assert!(!bridge.emit(2));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn helper_predicates() {
        let yes = always_handled::<i32>();
        assert!(yes(&0).unwrap());
        let even = handled_when(|v: &i32| v % 2 == 0);
        assert!(even(&2).unwrap());
        assert!(!even(&3).unwrap());
    }
}
