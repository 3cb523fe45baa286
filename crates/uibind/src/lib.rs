#![forbid(unsafe_code)]

//! uibind: UI listener registration points as push streams, setters as sinks.
//!
//! Each module binds one widget type from `uibind-widgets` and is a flat set
//! of free functions. A stream function returns a [`BridgeStream`] (cold:
//! only future events) or an [`InitialValueStream`] (warm: the current state
//! first, synchronously inside `subscribe`). A sink function returns a
//! [`Sink`].
//!
//! ```ignore
//! use uibind::prelude::*;
//!
//! let mut scope = DisposeScope::new();
//! scope.hold(view::clicks(&button).subscribe_fn(|()| submit()));
//! scope.hold(adapter_view::item_selections(&list).subscribe_fn(|pos| show(pos)));
//! let hide = view::visibility(&spinner);
//! hide.set(false);
//! ```
//!
//! # Retention
//!
//! Every subscription holds a strong reference to its widget until it is
//! disposed; an abandoned subscription keeps the widget alive. Sinks hold
//! their widget for as long as the sink lives.
//!
//! # Threading
//!
//! Subscribe on the widget's owner thread. Subscribing anywhere else yields
//! one [`BindError::WrongThread`](uibind_core::BindError::WrongThread) and
//! attaches nothing.
//!
//! # Single-slot hazard
//!
//! Most listener kinds have one slot per widget. Two live subscriptions of
//! the same kind on the same widget do not both receive events: the second
//! replaces the first, and disposing either clears the slot. Text watchers
//! and pager listeners are the exception; they use add/remove registration.
//!
//! # Feature Flags
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `tracing` | Structured logs for subscribe, attach, dispose, dropped events |
//! | `serde` | `Serialize`/`Deserialize` on event payloads |

pub mod adapter_view;
pub mod events;
pub mod nested_scroll_view;
pub mod popup_menu;
pub mod prelude;
pub mod search_bar;
pub mod search_view;
pub mod swipe_dismiss;
pub mod text_view;
pub mod view;
pub mod view_pager;

pub use uibind_core::{BindError, Disposable, Observer};
pub use uibind_runtime::{BridgeStream, DisposeScope, InitialValueStream, Sink, Subscribe};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use uibind_core::{BindError, Observer};

    /// Appends every value to a shared vector; errors are ignored.
    pub(crate) struct Recorder<T>(Arc<Mutex<Vec<T>>>);

    impl<T: Send + 'static> Observer<T> for Recorder<T> {
        fn on_next(&mut self, value: T) {
            self.0.lock().unwrap().push(value);
        }

        fn on_error(&mut self, _: BindError) {}
    }

    pub(crate) fn record<T>() -> (Arc<Mutex<Vec<T>>>, Recorder<T>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Arc::clone(&seen), Recorder(seen))
    }
}
