#![forbid(unsafe_code)]

//! Lifecycle scope for a group of subscriptions.
//!
//! Dropping a bare [`Disposable`] releases nothing. A [`DisposeScope`] owns
//! the handles of one logical unit (a screen, a widget controller) and
//! disposes all of them when it is dropped or cleared.
//!
//! # Usage
//!
//! ```ignore
//! let mut scope = DisposeScope::new();
//! scope.hold(view::clicks(&button).subscribe_fn(|()| submit()));
//! scope.hold(text_view::text_changes(&field).subscribe_fn(|t| validate(&t)));
//! // Leaving the screen: both listeners are detached.
//! drop(scope);
//! ```
//!
//! # Invariants
//!
//! 1. Handles are disposed in reverse registration order.
//! 2. After `clear()` or drop, no held subscription forwards anything.
//! 3. `clear()` leaves the scope empty and reusable.
//! 4. Already-disposed handles are purged when new ones are held.

use std::fmt;

use uibind_core::{Disposable, Observer};

use crate::stream::Subscribe;

/// Owns subscription handles and disposes them together.
pub struct DisposeScope {
    handles: Vec<Disposable>,
}

impl DisposeScope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Take ownership of `handle`.
    pub fn hold(&mut self, handle: Disposable) -> &mut Self {
        self.handles.retain(|h| !h.is_disposed());
        self.handles.push(handle);
        self
    }

    /// Subscribe `observer` to `stream` and hold the resulting handle.
    pub fn subscribe<T>(
        &mut self,
        stream: &dyn Subscribe<T>,
        observer: impl Observer<T>,
    ) -> &mut Self {
        let handle = stream.subscribe_boxed(Box::new(observer));
        self.hold(handle)
    }

    /// Number of held handles that are still active.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_disposed()).count()
    }

    /// Whether no active handle is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispose every held handle now. Same as [`clear`](Self::clear).
    pub fn dispose_all(&mut self) {
        self.clear();
    }

    /// Dispose every held handle now. The scope stays usable.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(count = self.handles.len(), "disposing scope");
        while let Some(handle) = self.handles.pop() {
            handle.dispose();
        }
    }
}

impl Default for DisposeScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DisposeScope {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for DisposeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeScope")
            .field("active", &self.len())
            .finish()
    }
}
