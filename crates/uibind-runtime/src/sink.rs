#![forbid(unsafe_code)]

//! Sink adapters: direct state mutations exposed as callable consumers.
//!
//! A [`Sink`] has no subscription lifecycle. `accept` applies one value to
//! the source synchronously and returns whatever the mutation returned.
//! Sinks built with [`Sink::bind`] keep a strong reference to their source.
//!
//! Factories that can detect a meaningless configuration up front return
//! `Result<Sink<_>, BindError>` and fail with
//! [`BindError::InvalidArgument`] before touching the source.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use uibind_core::BindError;

/// Callable wrapper around a state mutation.
pub struct Sink<T, E = BindError> {
    apply: Arc<dyn Fn(T) -> Result<(), E> + Send + Sync>,
}

impl<T, E> Clone for Sink<T, E> {
    fn clone(&self) -> Self {
        Self {
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T: 'static, E: 'static> Sink<T, E> {
    /// Wrap a fallible mutation.
    pub fn new(apply: impl Fn(T) -> Result<(), E> + Send + Sync + 'static) -> Self {
        Self {
            apply: Arc::new(apply),
        }
    }

    /// Wrap a mutation that cannot fail.
    pub fn infallible(apply: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(move |value| {
            apply(value);
            Ok(())
        })
    }

    /// Bind a fallible mutation to `source`, which the sink keeps alive.
    pub fn bind<S>(
        source: S,
        apply: impl Fn(&S, T) -> Result<(), E> + Send + Sync + 'static,
    ) -> Self
    where
        S: Send + Sync + 'static,
    {
        Self::new(move |value| apply(&source, value))
    }

    /// Apply `value` to the source.
    ///
    /// # Errors
    ///
    /// Whatever the underlying mutation reports, unchanged.
    pub fn accept(&self, value: T) -> Result<(), E> {
        (self.apply)(value)
    }

    /// Adapt the input type.
    pub fn contramap<U: 'static>(self, f: impl Fn(U) -> T + Send + Sync + 'static) -> Sink<U, E> {
        Sink::new(move |value| self.accept(f(value)))
    }
}

impl<T: 'static> Sink<T, Infallible> {
    /// Apply `value` to a source whose mutation cannot fail.
    pub fn set(&self, value: T) {
        match (self.apply)(value) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}

impl<T, E> fmt::Debug for Sink<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn infallible_sink_applies_value() {
        let target = Arc::new(Mutex::new(0));
        let t = Arc::clone(&target);
        let sink: Sink<i32> = Sink::infallible(move |v| *t.lock().unwrap() = v);
        sink.accept(7).unwrap();
        assert_eq!(*target.lock().unwrap(), 7);
    }

    #[test]
    fn fallible_sink_propagates_error_unchanged() {
        #[derive(Debug, PartialEq)]
        struct OutOfRange(usize);

        let sink = Sink::new(|index: usize| {
            if index < 3 {
                Ok(())
            } else {
                Err(OutOfRange(index))
            }
        });
        assert_eq!(sink.accept(1), Ok(()));
        assert_eq!(sink.accept(9), Err(OutOfRange(9)));
    }

    #[test]
    fn bound_sink_retains_source() {
        let source = Arc::new(Mutex::new(String::new()));
        let sink: Sink<String, Infallible> =
            Sink::bind(Arc::clone(&source), |s: &Arc<Mutex<String>>, text: String| {
                *s.lock().unwrap() = text;
                Ok(())
            });
        assert_eq!(Arc::strong_count(&source), 2);
        sink.set("query".to_string());
        assert_eq!(*source.lock().unwrap(), "query");
        drop(sink);
        assert_eq!(Arc::strong_count(&source), 1);
    }

    #[test]
    fn contramap_adapts_input() {
        let target = Arc::new(Mutex::new(false));
        let t = Arc::clone(&target);
        let sink: Sink<bool, Infallible> = Sink::infallible(move |v| *t.lock().unwrap() = v);
        let inverted = sink.contramap(|v: bool| !v);
        inverted.set(false);
        assert!(*target.lock().unwrap());
    }
}
