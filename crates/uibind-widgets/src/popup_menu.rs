#![forbid(unsafe_code)]

//! Anchored popup menu.

use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerSlot, UiThread};

use crate::view::{View, replace_slot};

/// One entry of a popup menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuItem {
    pub id: i32,
    pub title: String,
}

impl MenuItem {
    #[must_use]
    pub fn new(id: i32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Returns whether the click was consumed.
pub type MenuItemClickListener = Arc<dyn Fn(&MenuItem) -> bool + Send + Sync>;
pub type DismissListener = Arc<dyn Fn(&PopupMenu) + Send + Sync>;

#[derive(Debug)]
struct MenuState {
    items: Vec<MenuItem>,
    showing: bool,
}

struct MenuInner {
    thread: UiThread,
    anchor: View,
    state: Mutex<MenuState>,
    item_click: ListenerSlot<MenuItemClickListener>,
    dismiss: ListenerSlot<DismissListener>,
}

#[derive(Clone)]
pub struct PopupMenu {
    inner: Arc<MenuInner>,
}

impl PopupMenu {
    /// Create a menu anchored to `anchor`, owned by the anchor's thread.
    #[must_use]
    pub fn new(anchor: &View, items: Vec<MenuItem>) -> Self {
        Self {
            inner: Arc::new(MenuInner {
                thread: anchor.ui_thread(),
                anchor: anchor.clone(),
                state: Mutex::new(MenuState {
                    items,
                    showing: false,
                }),
                item_click: ListenerSlot::new(),
                dismiss: ListenerSlot::new(),
            }),
        }
    }

    #[must_use]
    pub fn anchor(&self) -> &View {
        &self.inner.anchor
    }

    #[must_use]
    pub fn items(&self) -> Vec<MenuItem> {
        lock(&self.inner.state).items.clone()
    }

    #[must_use]
    pub fn is_showing(&self) -> bool {
        lock(&self.inner.state).showing
    }

    pub fn show(&self) {
        lock(&self.inner.state).showing = true;
    }

    /// Hide the menu. Fires the dismiss listener if it was showing.
    pub fn dismiss(&self) {
        let was_showing = std::mem::replace(&mut lock(&self.inner.state).showing, false);
        if was_showing {
            if let Some(listener) = self.inner.dismiss.get() {
                listener(self);
            }
        }
    }

    /// Click the item with `id`, then dismiss the menu.
    ///
    /// Returns whether the click listener consumed it; `false` for an unknown id.
    pub fn click_item(&self, id: i32) -> bool {
        let item = lock(&self.inner.state)
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned();
        let Some(item) = item else {
            return false;
        };
        let consumed = self
            .inner
            .item_click
            .get()
            .is_some_and(|listener| listener(&item));
        self.dismiss();
        consumed
    }

    pub fn set_on_menu_item_click_listener(&self, listener: Option<MenuItemClickListener>) {
        replace_slot(&self.inner.item_click, listener);
    }

    #[must_use]
    pub fn has_on_menu_item_click_listener(&self) -> bool {
        self.inner.item_click.is_set()
    }

    pub fn set_on_dismiss_listener(&self, listener: Option<DismissListener>) {
        replace_slot(&self.inner.dismiss, listener);
    }

    #[must_use]
    pub fn has_on_dismiss_listener(&self) -> bool {
        self.inner.dismiss.is_set()
    }
}

impl EventSource for PopupMenu {
    fn ui_thread(&self) -> UiThread {
        self.inner.thread
    }
}

impl fmt::Debug for PopupMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.inner.state);
        f.debug_struct("PopupMenu")
            .field("anchor", &self.inner.anchor.id())
            .field("items", &state.items.len())
            .field("showing", &state.showing)
            .finish()
    }
}
