#![forbid(unsafe_code)]

//! Scrolling container reporting scroll offset changes.

use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerSlot, UiThread};

use crate::view::{View, replace_slot};

/// Scroll offset in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

/// `(view, new, old)`.
pub type ScrollChangeListener =
    Arc<dyn Fn(&NestedScrollView, ScrollOffset, ScrollOffset) + Send + Sync>;

struct ScrollInner {
    offset: Mutex<ScrollOffset>,
    scroll_change: ListenerSlot<ScrollChangeListener>,
}

#[derive(Clone)]
pub struct NestedScrollView {
    view: View,
    inner: Arc<ScrollInner>,
}

impl NestedScrollView {
    #[must_use]
    pub fn new() -> Self {
        Self::owned_by(UiThread::current())
    }

    #[must_use]
    pub fn owned_by(thread: UiThread) -> Self {
        Self {
            view: View::owned_by(thread),
            inner: Arc::new(ScrollInner {
                offset: Mutex::new(ScrollOffset::default()),
                scroll_change: ListenerSlot::new(),
            }),
        }
    }

    #[must_use]
    pub fn as_view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn scroll_offset(&self) -> ScrollOffset {
        *lock(&self.inner.offset)
    }

    /// Scroll to `(x, y)`. The listener fires only if the offset changed.
    pub fn scroll_to(&self, x: i32, y: i32) {
        let new = ScrollOffset { x, y };
        let old = std::mem::replace(&mut *lock(&self.inner.offset), new);
        if old == new {
            return;
        }
        if let Some(listener) = self.inner.scroll_change.get() {
            listener(self, new, old);
        }
    }

    pub fn scroll_by(&self, dx: i32, dy: i32) {
        let ScrollOffset { x, y } = self.scroll_offset();
        self.scroll_to(x.saturating_add(dx), y.saturating_add(dy));
    }

    pub fn set_on_scroll_change_listener(&self, listener: Option<ScrollChangeListener>) {
        replace_slot(&self.inner.scroll_change, listener);
    }

    #[must_use]
    pub fn has_on_scroll_change_listener(&self) -> bool {
        self.inner.scroll_change.is_set()
    }
}

impl Default for NestedScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for NestedScrollView {
    fn ui_thread(&self) -> UiThread {
        self.view.ui_thread()
    }
}

impl fmt::Debug for NestedScrollView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedScrollView")
            .field("id", &self.view.id())
            .field("offset", &*lock(&self.inner.offset))
            .finish()
    }
}
