//! Errors surfaced to subscribers and sink callers.
//!
//! # Failure Modes
//!
//! | Error | Cause | Delivery |
//! |-------|-------|----------|
//! | [`BindError::WrongThread`] | Subscribed off the UI thread | One `on_error`, nothing attached |
//! | [`BindError::Callback`] | A caller's predicate failed | One `on_error`, disposed |
//! | [`BindError::InvalidArgument`] | Meaningless sink configuration | Returned to the caller |
//!
//! Events arriving after disposal are not errors; they are dropped.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::thread::ThreadId;

/// Boxed error type accepted from caller-supplied callbacks.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors reported by bindings.
#[derive(Debug, Clone)]
pub enum BindError {
    /// Subscription attempted from a thread other than the source's UI thread.
    WrongThread {
        /// Thread that owns the event source.
        expected: ThreadId,
        /// Thread the subscription was attempted from.
        actual: ThreadId,
    },
    /// A caller-supplied callback (e.g. a "handled" predicate) failed.
    Callback(Arc<dyn Error + Send + Sync + 'static>),
    /// A sink was configured with an argument combination that has no effect.
    InvalidArgument(String),
}

impl BindError {
    /// Wrap a callback failure.
    pub fn callback(err: impl Into<BoxError>) -> Self {
        Self::Callback(Arc::from(err.into()))
    }

    /// Build an invalid-argument error with the given message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether this is a wrong-thread rejection.
    #[must_use]
    pub fn is_wrong_thread(&self) -> bool {
        matches!(self, Self::WrongThread { .. })
    }

    /// Whether this wraps a callback failure.
    #[must_use]
    pub fn is_callback(&self) -> bool {
        matches!(self, Self::Callback(_))
    }

    /// Whether this is an invalid-argument error.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongThread { expected, actual } => write!(
                f,
                "expected to be called on the UI thread {expected:?} but was called on {actual:?}"
            ),
            Self::Callback(err) => write!(f, "listener callback failed: {err}"),
            Self::InvalidArgument(msg) => f.write_str(msg),
        }
    }
}

impl Error for BindError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Callback(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn wrong_thread_message_names_both_threads() {
        let expected = thread::current().id();
        let actual = thread::spawn(|| thread::current().id()).join().unwrap();
        let err = BindError::WrongThread { expected, actual };
        let msg = err.to_string();
        assert!(msg.starts_with("expected to be called on the UI thread"));
        assert!(msg.contains(&format!("{actual:?}")));
        assert!(err.is_wrong_thread());
    }

    #[test]
    fn callback_error_exposes_source() {
        let err = BindError::callback("predicate exploded");
        assert!(err.is_callback());
        assert_eq!(err.to_string(), "listener callback failed: predicate exploded");
        assert_eq!(err.source().unwrap().to_string(), "predicate exploded");
    }

    #[test]
    fn invalid_argument_displays_message_verbatim() {
        let err = BindError::invalid_argument("no effect");
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "no effect");
        assert!(err.source().is_none());
    }

    #[test]
    fn clones_share_callback_payload() {
        let err = BindError::callback("boom");
        let copy = err.clone();
        match (&err, &copy) {
            (BindError::Callback(a), BindError::Callback(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => unreachable!(),
        }
    }
}
