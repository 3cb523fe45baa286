#![forbid(unsafe_code)]

//! Search box with change and submit callbacks.

use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerSlot, UiThread};

use crate::view::{View, replace_slot};

/// Receives query edits and submissions. Each callback returns whether it
/// handled the event.
pub trait QueryTextListener: Send + Sync {
    fn on_query_text_change(&self, view: &SearchView, query: &str) -> bool;
    fn on_query_text_submit(&self, view: &SearchView, query: &str) -> bool;
}

struct SearchInner {
    query: Mutex<String>,
    listener: ListenerSlot<Arc<dyn QueryTextListener>>,
}

#[derive(Clone)]
pub struct SearchView {
    view: View,
    inner: Arc<SearchInner>,
}

impl SearchView {
    #[must_use]
    pub fn new() -> Self {
        Self::owned_by(UiThread::current())
    }

    #[must_use]
    pub fn owned_by(thread: UiThread) -> Self {
        Self {
            view: View::owned_by(thread),
            inner: Arc::new(SearchInner {
                query: Mutex::new(String::new()),
                listener: ListenerSlot::new(),
            }),
        }
    }

    #[must_use]
    pub fn as_view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn query(&self) -> String {
        lock(&self.inner.query).clone()
    }

    /// Replace the query and notify the change callback; with `submit`, also
    /// submit the new query.
    pub fn set_query(&self, query: impl Into<String>, submit: bool) {
        let query = query.into();
        *lock(&self.inner.query) = query.clone();
        let listener = self.inner.listener.get();
        if let Some(listener) = &listener {
            listener.on_query_text_change(self, &query);
        }
        if submit {
            self.submit_query();
        }
    }

    /// Submit the current query. Returns whether the listener handled it.
    pub fn submit_query(&self) -> bool {
        let query = self.query();
        #[cfg(feature = "tracing")]
        tracing::trace!(view = self.view.id().get(), "query submitted");
        self.inner
            .listener
            .get()
            .is_some_and(|listener| listener.on_query_text_submit(self, &query))
    }

    pub fn set_on_query_text_listener(&self, listener: Option<Arc<dyn QueryTextListener>>) {
        replace_slot(&self.inner.listener, listener);
    }

    #[must_use]
    pub fn has_on_query_text_listener(&self) -> bool {
        self.inner.listener.is_set()
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for SearchView {
    fn ui_thread(&self) -> UiThread {
        self.view.ui_thread()
    }
}

impl fmt::Debug for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchView")
            .field("id", &self.view.id())
            .field("query", &*lock(&self.inner.query))
            .finish()
    }
}
