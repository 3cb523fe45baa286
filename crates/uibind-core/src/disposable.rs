//! Idempotent cancellation handle for one subscription.
//!
//! A [`Disposable`] represents "this subscription is attached to exactly one
//! event source". Disposing it runs the release action (typically: clear the
//! source's listener slot) exactly once.
//!
//! # Invariants
//!
//! 1. `dispose()` is idempotent: the second and later calls are no-ops.
//! 2. The release action runs at most once, on the first `dispose()`.
//! 3. `is_disposed()` is `true` from the moment `dispose()` starts.
//! 4. Clones share state: disposing any clone disposes all of them.
//!
//! # Failure Modes
//!
//! - Release action returns `Err` or panics: swallowed (logged under the
//!   `tracing` feature). Disposal is best-effort cleanup, not a transaction.
//! - Dropping a handle without disposing it does **not** release anything.
//!   Use a scope that disposes on drop when that is wanted.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::BoxError;
use crate::sync::lock;

type ReleaseAction = Box<dyn FnOnce() -> Result<(), BoxError> + Send>;

struct DisposeState {
    disposed: AtomicBool,
    action: Mutex<Option<ReleaseAction>>,
}

/// Cancellation handle returned for each subscription.
#[derive(Clone)]
pub struct Disposable {
    state: Arc<DisposeState>,
}

impl Disposable {
    fn with_state(disposed: bool, action: Option<ReleaseAction>) -> Self {
        Self {
            state: Arc::new(DisposeState {
                disposed: AtomicBool::new(disposed),
                action: Mutex::new(action),
            }),
        }
    }

    /// Create an active handle whose release action is `action`.
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self::with_state(
            false,
            Some(Box::new(move || {
                action();
                Ok(())
            })),
        )
    }

    /// Create an active handle whose release action may fail.
    ///
    /// A failure is swallowed when the handle is disposed.
    pub fn fallible(action: impl FnOnce() -> Result<(), BoxError> + Send + 'static) -> Self {
        Self::with_state(false, Some(Box::new(action)))
    }

    /// Create an active handle with no release action yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_state(false, None)
    }

    /// Create a handle that is already disposed.
    #[must_use]
    pub fn disposed() -> Self {
        Self::with_state(true, None)
    }

    /// Whether `dispose()` has been called on this handle or any clone.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.disposed.load(Ordering::Acquire)
    }

    /// Install the release action.
    ///
    /// Replaces any action installed earlier (the old one is dropped without
    /// running). If the handle is already disposed, `action` runs immediately.
    pub fn set_action(&self, action: impl FnOnce() -> Result<(), BoxError> + Send + 'static) {
        let mut slot = lock(&self.state.action);
        if self.is_disposed() {
            drop(slot);
            release(Box::new(action));
        } else {
            *slot = Some(Box::new(action));
        }
    }

    /// Dispose the handle, running the release action on the first call.
    pub fn dispose(&self) {
        if self.state.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let action = lock(&self.state.action).take();
        if let Some(action) = action {
            release(action);
        }
    }

    /// Whether two handles refer to the same subscription.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

fn release(action: ReleaseAction) {
    match panic::catch_unwind(AssertUnwindSafe(action)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "release action failed; listener may still be attached");
            drop(err);
        }
        Err(_) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("release action panicked; listener may still be attached");
        }
    }
}

impl Default for Disposable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
