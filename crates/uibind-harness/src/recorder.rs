//! Recording observer.
//!
//! ```ignore
//! let recorder = RecordingObserver::new();
//! let handle = view::clicks(&button).subscribe(recorder.clone());
//! button.perform_click();
//! recorder.take_next();
//! recorder.assert_no_more_events();
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{BindError, Disposable, Observer};

/// One recorded call on the observer.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    Subscribe,
    Next(T),
    Error(BindError),
}

struct Tape<T> {
    pending: VecDeque<Notification<T>>,
    handle: Option<Disposable>,
}

/// Observer that queues every notification. Clones share the same queue, so
/// one clone can be handed to `subscribe` while the test keeps another.
///
/// `on_subscribe` stores the handle and is not queued; the `take_*` methods
/// see only values and errors.
pub struct RecordingObserver<T> {
    tape: Arc<Mutex<Tape<T>>>,
}

impl<T> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            tape: Arc::clone(&self.tape),
        }
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tape: Arc::new(Mutex::new(Tape {
                pending: VecDeque::new(),
                handle: None,
            })),
        }
    }

    /// The handle passed to `on_subscribe`, if it was called.
    #[must_use]
    pub fn handle(&self) -> Option<Disposable> {
        lock(&self.tape).handle.clone()
    }

    /// Number of queued notifications.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.tape).pending.len()
    }

    /// Pop the next notification.
    ///
    /// # Panics
    ///
    /// If nothing is queued.
    #[track_caller]
    pub fn take(&self) -> Notification<T> {
        match lock(&self.tape).pending.pop_front() {
            Some(notification) => notification,
            None => panic!("expected a notification, but none was recorded"),
        }
    }

    /// Pop the next notification, which must be a value.
    ///
    /// # Panics
    ///
    /// If nothing is queued or the next notification is an error.
    #[track_caller]
    pub fn take_next(&self) -> T {
        match self.take() {
            Notification::Next(value) => value,
            Notification::Error(error) => panic!("expected a value, got error: {error}"),
            Notification::Subscribe => unreachable!("subscribe is not queued"),
        }
    }

    /// Pop the next notification, which must be an error.
    ///
    /// # Panics
    ///
    /// If nothing is queued or the next notification is a value.
    #[track_caller]
    pub fn take_error(&self) -> BindError {
        match self.take() {
            Notification::Error(error) => error,
            Notification::Next(_) => panic!("expected an error, got a value"),
            Notification::Subscribe => unreachable!("subscribe is not queued"),
        }
    }

    /// # Panics
    ///
    /// If any notification is still queued.
    #[track_caller]
    pub fn assert_no_more_events(&self) {
        let pending = self.pending();
        assert_eq!(pending, 0, "expected no more events, {pending} still queued");
    }
}

impl<T: Clone> RecordingObserver<T> {
    /// All queued values, without consuming them.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        lock(&self.tape)
            .pending
            .iter()
            .filter_map(|n| match n {
                Notification::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<T: Send + 'static> Observer<T> for RecordingObserver<T> {
    fn on_subscribe(&mut self, handle: Disposable) {
        lock(&self.tape).handle = Some(handle);
    }

    fn on_next(&mut self, value: T) {
        lock(&self.tape).pending.push_back(Notification::Next(value));
    }

    fn on_error(&mut self, error: BindError) {
        lock(&self.tape).pending.push_back(Notification::Error(error));
    }
}

impl<T> fmt::Debug for RecordingObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tape = lock(&self.tape);
        f.debug_struct("RecordingObserver")
            .field("pending", &tape.pending.len())
            .field("subscribed", &tape.handle.is_some())
            .finish()
    }
}
