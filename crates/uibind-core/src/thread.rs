//! Thread-affinity guard.
//!
//! UI listener slots are not safe for concurrent attach/detach/invoke, so
//! every event source is owned by one [`UiThread`]. Bridges check, once at
//! subscribe time, that the subscriber is on that thread. Later calls are not
//! policed, matching the listener model being wrapped.

use std::thread::{self, ThreadId};

use crate::config::{self, ThreadCheck};
use crate::disposable::Disposable;
use crate::error::BindError;
use crate::observer::Observer;

/// The single thread allowed to mutate an event source's listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UiThread(ThreadId);

impl UiThread {
    /// The calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self(thread::current().id())
    }

    /// Wrap an existing thread id.
    #[must_use]
    pub const fn from_id(id: ThreadId) -> Self {
        Self(id)
    }

    /// Underlying thread id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> ThreadId {
        self.0
    }

    /// Whether the calling thread is this UI thread.
    #[inline]
    #[must_use]
    pub fn is_current(self) -> bool {
        thread::current().id() == self.0
    }
}

/// An object that exposes listener registration points.
///
/// Implemented by every widget handle. Handles are cheap to clone; a clone
/// refers to the same widget.
pub trait EventSource: Clone + Send + Sync + 'static {
    /// The thread that owns this source's listener slots.
    fn ui_thread(&self) -> UiThread;
}

/// Run the thread-affinity guard for a new subscription.
///
/// Returns `true` when the caller may proceed. Otherwise `observer` receives
/// an already-disposed handle followed by a single
/// [`BindError::WrongThread`], and the caller must abort without attaching
/// anything. Enforcement can be turned off through [`config`].
pub fn check_ui_thread<T, O>(owner: UiThread, observer: &mut O) -> bool
where
    O: Observer<T> + ?Sized,
{
    if owner.is_current() || config::current().thread_check == ThreadCheck::Disabled {
        return true;
    }
    let actual = thread::current().id();
    #[cfg(feature = "tracing")]
    tracing::warn!(
        expected = ?owner.id(),
        actual = ?actual,
        "subscription rejected: not on the source's UI thread"
    );
    observer.on_subscribe(Disposable::disposed());
    observer.on_error(BindError::WrongThread {
        expected: owner.id(),
        actual,
    });
    false
}
