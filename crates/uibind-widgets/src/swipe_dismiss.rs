#![forbid(unsafe_code)]

//! Swipe-to-dismiss behavior attached to a view.

use std::fmt;
use std::sync::Arc;

use uibind_core::{EventSource, ListenerSlot, UiThread};

use crate::view::{View, Visibility, replace_slot};

pub type SwipeDismissListener = Arc<dyn Fn(&View) + Send + Sync>;

struct BehaviorInner {
    view: View,
    dismiss: ListenerSlot<SwipeDismissListener>,
}

/// Lets the user swipe its view away.
#[derive(Clone)]
pub struct SwipeDismissBehavior {
    inner: Arc<BehaviorInner>,
}

impl SwipeDismissBehavior {
    #[must_use]
    pub fn new(view: &View) -> Self {
        Self {
            inner: Arc::new(BehaviorInner {
                view: view.clone(),
                dismiss: ListenerSlot::new(),
            }),
        }
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.inner.view
    }

    /// Complete a dismiss gesture: hide the view, then notify the listener.
    pub fn swipe(&self) {
        self.inner.view.set_visibility(Visibility::Gone);
        if let Some(listener) = self.inner.dismiss.get() {
            listener(&self.inner.view);
        }
    }

    pub fn set_listener(&self, listener: Option<SwipeDismissListener>) {
        replace_slot(&self.inner.dismiss, listener);
    }

    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.inner.dismiss.is_set()
    }
}

impl EventSource for SwipeDismissBehavior {
    fn ui_thread(&self) -> UiThread {
        self.inner.view.ui_thread()
    }
}

impl fmt::Debug for SwipeDismissBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeDismissBehavior")
            .field("view", &self.inner.view.id())
            .finish()
    }
}
