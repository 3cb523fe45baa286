//! Downstream consumer contract.
//!
//! An [`Observer`] receives, in order:
//!
//! 1. exactly one `on_subscribe` carrying the subscription's [`Disposable`];
//! 2. zero or more `on_next` values;
//! 3. at most one `on_error`, after which nothing else is delivered.
//!
//! There is no completion signal: UI event sources are unbounded, so a
//! subscription ends only through disposal or a terminal error.

use crate::disposable::Disposable;
use crate::error::BindError;

/// Consumer of a bridged event stream.
pub trait Observer<T>: Send + 'static {
    /// Called once, before any value, with the subscription's handle.
    fn on_subscribe(&mut self, handle: Disposable) {
        let _ = handle;
    }

    /// Called for every forwarded value.
    fn on_next(&mut self, value: T);

    /// Called at most once with a terminal failure.
    fn on_error(&mut self, error: BindError);
}

impl<T, O> Observer<T> for Box<O>
where
    O: Observer<T> + ?Sized,
{
    fn on_subscribe(&mut self, handle: Disposable) {
        (**self).on_subscribe(handle);
    }

    fn on_next(&mut self, value: T) {
        (**self).on_next(value);
    }

    fn on_error(&mut self, error: BindError) {
        (**self).on_error(error);
    }
}

/// Observer built from closures.
///
/// Created with [`from_fn`] or [`from_fns`]. Errors without an error closure
/// are logged under the `tracing` feature and otherwise dropped.
pub struct FnObserver<N, E = fn(BindError)> {
    on_next: N,
    on_error: Option<E>,
}

/// Observer that passes every value to `on_next`.
pub fn from_fn<T, N>(on_next: N) -> FnObserver<N>
where
    N: FnMut(T) + Send + 'static,
{
    FnObserver {
        on_next,
        on_error: None,
    }
}

/// Observer with separate value and error closures.
pub fn from_fns<T, N, E>(on_next: N, on_error: E) -> FnObserver<N, E>
where
    N: FnMut(T) + Send + 'static,
    E: FnMut(BindError) + Send + 'static,
{
    FnObserver {
        on_next,
        on_error: Some(on_error),
    }
}

impl<T, N, E> Observer<T> for FnObserver<N, E>
where
    N: FnMut(T) + Send + 'static,
    E: FnMut(BindError) + Send + 'static,
{
    fn on_next(&mut self, value: T) {
        (self.on_next)(value);
    }

    fn on_error(&mut self, error: BindError) {
        match self.on_error.as_mut() {
            Some(on_error) => on_error(error),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%error, "unhandled binding error");
                drop(error);
            }
        }
    }
}

impl<N, E> std::fmt::Debug for FnObserver<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnObserver")
            .field("handles_errors", &self.on_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn from_fn_forwards_values() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut obs = from_fn(move |v: i32| sink.lock().unwrap().push(v));
        obs.on_subscribe(Disposable::empty());
        obs.on_next(1);
        obs.on_next(2);
        obs.on_error(BindError::invalid_argument("ignored"));
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn from_fns_routes_errors() {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        let mut obs = from_fns(
            |_: ()| {},
            move |e: BindError| sink.lock().unwrap().push(e.to_string()),
        );
        obs.on_error(BindError::invalid_argument("bad"));
        assert_eq!(*errors.lock().unwrap(), vec!["bad".to_string()]);
    }

    #[test]
    fn boxed_observer_delegates() {
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let mut boxed: Box<dyn Observer<i32>> =
            Box::new(from_fn(move |v: i32| *sink.lock().unwrap() += v));
        boxed.on_next(3);
        boxed.on_next(4);
        assert_eq!(*seen.lock().unwrap(), 7);
    }
}
