//! Listener registration points exposed by event sources.
//!
//! [`ListenerSlot`] models the common "exactly one listener at a time"
//! registration (`setOnClickListener`-style): setting a listener supersedes
//! the previous one, never queues behind it. [`ListenerList`] models
//! add/remove registration where several listeners coexist.
//!
//! # Invariants
//!
//! 1. A slot holds at most one listener; `set` returns the superseded one.
//! 2. `get`/`snapshot` clone listeners out and release the lock before the
//!    caller invokes them, so a listener may clear its own slot (dispose)
//!    while it is running.
//! 3. List keys are never reused within one list.

use std::fmt;
use std::sync::Mutex;

use crate::sync::lock;

/// Single-listener registration point.
pub struct ListenerSlot<L> {
    inner: Mutex<Option<L>>,
}

impl<L> ListenerSlot<L> {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Install `listener`, returning the listener it supersedes.
    pub fn set(&self, listener: L) -> Option<L> {
        lock(&self.inner).replace(listener)
    }

    /// Empty the slot, returning the removed listener.
    pub fn clear(&self) -> Option<L> {
        lock(&self.inner).take()
    }

    /// Whether a listener is installed.
    #[must_use]
    pub fn is_set(&self) -> bool {
        lock(&self.inner).is_some()
    }
}

impl<L: Clone> ListenerSlot<L> {
    /// Clone the installed listener out of the slot.
    #[must_use]
    pub fn get(&self) -> Option<L> {
        lock(&self.inner).clone()
    }
}

impl<L> Default for ListenerSlot<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> fmt::Debug for ListenerSlot<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("is_set", &self.is_set())
            .finish()
    }
}

/// Key identifying one listener in a [`ListenerList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

impl ListenerKey {
    /// Raw key value.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

struct ListInner<L> {
    next: u64,
    entries: Vec<(ListenerKey, L)>,
}

/// Multi-listener registration point with add/remove semantics.
pub struct ListenerList<L> {
    inner: Mutex<ListInner<L>>,
}

impl<L> ListenerList<L> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(ListInner {
                next: 1,
                entries: Vec::new(),
            }),
        }
    }

    /// Register `listener`, returning the key that removes it.
    pub fn add(&self, listener: L) -> ListenerKey {
        let mut inner = lock(&self.inner);
        let key = ListenerKey(inner.next);
        inner.next += 1;
        inner.entries.push((key, listener));
        key
    }

    /// Remove the listener registered under `key`.
    ///
    /// Returns `None` if it was already removed.
    pub fn remove(&self, key: ListenerKey) -> Option<L> {
        let mut inner = lock(&self.inner);
        let index = inner.entries.iter().position(|(k, _)| *k == key)?;
        Some(inner.entries.remove(index).1)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.inner).entries.is_empty()
    }
}

impl<L: Clone> ListenerList<L> {
    /// Clone all listeners out, in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<L> {
        lock(&self.inner)
            .entries
            .iter()
            .map(|(_, l)| l.clone())
            .collect()
    }
}

impl<L> Default for ListenerList<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> fmt::Debug for ListenerList<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn slot_supersedes_previous_listener() {
        let slot = ListenerSlot::new();
        assert!(!slot.is_set());
        assert_eq!(slot.set("first"), None);
        assert_eq!(slot.set("second"), Some("first"));
        assert_eq!(slot.get(), Some("second"));
    }

    #[test]
    fn slot_clear_empties() {
        let slot = ListenerSlot::new();
        slot.set(1);
        assert_eq!(slot.clear(), Some(1));
        assert!(!slot.is_set());
        assert_eq!(slot.clear(), None);
    }

    #[test]
    fn listener_may_clear_its_own_slot() {
        let slot: Arc<ListenerSlot<Arc<dyn Fn() + Send + Sync>>> = Arc::new(ListenerSlot::new());
        let weak = Arc::downgrade(&slot);
        slot.set(Arc::new(move || {
            if let Some(slot) = weak.upgrade() {
                slot.clear();
            }
        }));
        let listener = slot.get().unwrap();
        listener();
        assert!(!slot.is_set());
    }

    #[test]
    fn list_add_remove_by_key() {
        let list = ListenerList::new();
        let a = list.add("a");
        let b = list.add("b");
        let c = list.add("c");
        assert_eq!(list.len(), 3);
        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.remove(b), None);
        assert_eq!(list.snapshot(), vec!["a", "c"]);
        assert_ne!(a, c);
        assert!(a.id() < c.id());
    }

    #[test]
    fn list_keys_are_not_reused() {
        let list = ListenerList::new();
        let a = list.add(());
        list.remove(a);
        let b = list.add(());
        assert_ne!(a, b);
        assert!(!list.is_empty());
    }
}
