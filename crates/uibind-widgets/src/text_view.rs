#![forbid(unsafe_code)]

//! Editable text widget.
//!
//! Text watchers use add/remove registration ([`ListenerList`]) so several
//! can coexist; the editor-action listener is a single slot. Offsets and
//! counts reported to watchers are in `char`s.

use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerKey, ListenerList, ListenerSlot, UiThread};

use crate::view::{View, replace_slot};

/// IME action identifiers passed to editor-action listeners.
pub mod ime {
    pub const ACTION_UNSPECIFIED: i32 = 0;
    pub const ACTION_NONE: i32 = 1;
    pub const ACTION_GO: i32 = 2;
    pub const ACTION_SEARCH: i32 = 3;
    pub const ACTION_SEND: i32 = 4;
    pub const ACTION_NEXT: i32 = 5;
    pub const ACTION_DONE: i32 = 6;
    pub const ACTION_PREVIOUS: i32 = 7;
}

/// Observer of text edits. Every callback runs after the text lock is released.
pub trait TextWatcher: Send + Sync {
    /// `count` chars at `start` are about to be replaced by `after` new chars.
    fn before_text_changed(
        &self,
        _view: &TextView,
        _text: &str,
        _start: usize,
        _count: usize,
        _after: usize,
    ) {
    }

    /// `count` chars at `start` just replaced `before` old chars.
    fn on_text_changed(
        &self,
        _view: &TextView,
        _text: &str,
        _start: usize,
        _before: usize,
        _count: usize,
    ) {
    }

    fn after_text_changed(&self, _view: &TextView, _text: &str) {}
}

/// Returns whether the action was consumed.
pub type EditorActionListener = Arc<dyn Fn(&TextView, i32) -> bool + Send + Sync>;

struct TextInner {
    text: Mutex<String>,
    watchers: ListenerList<Arc<dyn TextWatcher>>,
    editor_action: ListenerSlot<EditorActionListener>,
}

/// Shared handle to one text view.
#[derive(Clone)]
pub struct TextView {
    view: View,
    inner: Arc<TextInner>,
}

impl TextView {
    #[must_use]
    pub fn new() -> Self {
        Self::owned_by(UiThread::current())
    }

    #[must_use]
    pub fn owned_by(thread: UiThread) -> Self {
        Self {
            view: View::owned_by(thread),
            inner: Arc::new(TextInner {
                text: Mutex::new(String::new()),
                watchers: ListenerList::new(),
                editor_action: ListenerSlot::new(),
            }),
        }
    }

    /// The underlying view (flags, focus, click slots).
    #[must_use]
    pub fn as_view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn text(&self) -> String {
        lock(&self.inner.text).clone()
    }

    /// Replace the whole text. Watchers fire even if the text is unchanged.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let old_len = lock(&self.inner.text).chars().count();
        let new_len = text.chars().count();
        self.edit(0, old_len, new_len, move |buf| *buf = text);
    }

    /// Append `suffix` to the end of the text.
    pub fn append(&self, suffix: &str) {
        let start = lock(&self.inner.text).chars().count();
        let count = suffix.chars().count();
        self.edit(start, 0, count, |buf| buf.push_str(suffix));
    }

    fn edit(&self, start: usize, before: usize, count: usize, apply: impl FnOnce(&mut String)) {
        let watchers = self.inner.watchers.snapshot();
        let old = self.text();
        for watcher in &watchers {
            watcher.before_text_changed(self, &old, start, before, count);
        }
        let new = {
            let mut buf = lock(&self.inner.text);
            apply(&mut buf);
            buf.clone()
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(view = self.view.id().get(), start, before, count, "text changed");
        for watcher in &watchers {
            watcher.on_text_changed(self, &new, start, before, count);
        }
        for watcher in &watchers {
            watcher.after_text_changed(self, &new);
        }
    }

    /// Register a text watcher; the key removes it again.
    pub fn add_text_changed_listener(&self, watcher: Arc<dyn TextWatcher>) -> ListenerKey {
        self.inner.watchers.add(watcher)
    }

    /// Remove the watcher registered under `key`. Returns whether it was present.
    pub fn remove_text_changed_listener(&self, key: ListenerKey) -> bool {
        self.inner.watchers.remove(key).is_some()
    }

    #[must_use]
    pub fn text_watcher_count(&self) -> usize {
        self.inner.watchers.len()
    }

    pub fn set_on_editor_action_listener(&self, listener: Option<EditorActionListener>) {
        replace_slot(&self.inner.editor_action, listener);
    }

    #[must_use]
    pub fn has_on_editor_action_listener(&self) -> bool {
        self.inner.editor_action.is_set()
    }

    /// Deliver an IME action. Returns whether the listener consumed it.
    pub fn on_editor_action(&self, action_id: i32) -> bool {
        self.inner
            .editor_action
            .get()
            .is_some_and(|listener| listener(self, action_id))
    }
}

impl Default for TextView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TextView {
    fn ui_thread(&self) -> UiThread {
        self.view.ui_thread()
    }
}

impl fmt::Debug for TextView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextView")
            .field("id", &self.view.id())
            .field("text", &*lock(&self.inner.text))
            .field("watchers", &self.inner.watchers.len())
            .finish()
    }
}
