#![forbid(unsafe_code)]

//! Leanback-style search bar: query edits, submission, keyboard dismissal.

use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerSlot, UiThread};

use crate::view::{View, replace_slot};

/// Receives search bar callbacks.
pub trait SearchBarListener: Send + Sync {
    fn on_search_query_change(&self, bar: &SearchBar, query: &str);
    fn on_search_query_submit(&self, bar: &SearchBar, query: &str);
    fn on_keyboard_dismiss(&self, bar: &SearchBar, query: &str);
}

struct BarInner {
    query: Mutex<String>,
    listener: ListenerSlot<Arc<dyn SearchBarListener>>,
}

#[derive(Clone)]
pub struct SearchBar {
    view: View,
    inner: Arc<BarInner>,
}

impl SearchBar {
    #[must_use]
    pub fn new() -> Self {
        Self::owned_by(UiThread::current())
    }

    #[must_use]
    pub fn owned_by(thread: UiThread) -> Self {
        Self {
            view: View::owned_by(thread),
            inner: Arc::new(BarInner {
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
    pub fn search_query(&self) -> String {
        lock(&self.inner.query).clone()
    }

    /// Replace the query and notify the change callback.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        *lock(&self.inner.query) = query.clone();
        if let Some(listener) = self.inner.listener.get() {
            listener.on_search_query_change(self, &query);
        }
    }

    /// Submit the current query.
    pub fn submit(&self) {
        let query = self.search_query();
        if let Some(listener) = self.inner.listener.get() {
            listener.on_search_query_submit(self, &query);
        }
    }

    /// Close the soft keyboard.
    pub fn dismiss_keyboard(&self) {
        let query = self.search_query();
        if let Some(listener) = self.inner.listener.get() {
            listener.on_keyboard_dismiss(self, &query);
        }
    }

    pub fn set_search_bar_listener(&self, listener: Option<Arc<dyn SearchBarListener>>) {
        replace_slot(&self.inner.listener, listener);
    }

    #[must_use]
    pub fn has_search_bar_listener(&self) -> bool {
        self.inner.listener.is_set()
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for SearchBar {
    fn ui_thread(&self) -> UiThread {
        self.view.ui_thread()
    }
}

impl fmt::Debug for SearchBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBar")
            .field("id", &self.view.id())
            .field("query", &*lock(&self.inner.query))
            .finish()
    }
}
