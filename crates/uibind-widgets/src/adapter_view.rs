#![forbid(unsafe_code)]

//! List-like widget backed by an adapter of item ids.

use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerSlot, UiThread};

use crate::error::WidgetError;
use crate::view::{View, replace_slot};

/// Position reported when nothing is selected.
pub const INVALID_POSITION: i32 = -1;
/// Row id reported when nothing is selected.
pub const INVALID_ROW_ID: i64 = i64::MIN;

/// Item click: `(view, position, id)`.
pub type ItemClickListener = Arc<dyn Fn(&AdapterView, i32, i64) + Send + Sync>;
/// Item long click: `(view, position, id)`, returns whether it was consumed.
pub type ItemLongClickListener = Arc<dyn Fn(&AdapterView, i32, i64) -> bool + Send + Sync>;

/// Receives selection changes.
pub trait ItemSelectedListener: Send + Sync {
    fn on_item_selected(&self, view: &AdapterView, position: i32, id: i64);
    fn on_nothing_selected(&self, view: &AdapterView);
}

#[derive(Debug)]
struct AdapterState {
    items: Vec<i64>,
    selected: i32,
}

struct AdapterInner {
    state: Mutex<AdapterState>,
    item_click: ListenerSlot<ItemClickListener>,
    item_long_click: ListenerSlot<ItemLongClickListener>,
    item_selected: ListenerSlot<Arc<dyn ItemSelectedListener>>,
}

/// Shared handle to one adapter view.
#[derive(Clone)]
pub struct AdapterView {
    view: View,
    inner: Arc<AdapterInner>,
}

enum SelectionChange {
    Selected(i32, i64),
    Nothing,
}

impl AdapterView {
    /// Create a view whose items have the given row ids. Nothing is selected.
    #[must_use]
    pub fn new(items: Vec<i64>) -> Self {
        Self::owned_by(UiThread::current(), items)
    }

    /// Create a view with `count` items whose ids equal their positions.
    #[must_use]
    pub fn with_count(count: usize) -> Self {
        Self::new((0..count as i64).collect())
    }

    #[must_use]
    pub fn owned_by(thread: UiThread, items: Vec<i64>) -> Self {
        Self {
            view: View::owned_by(thread),
            inner: Arc::new(AdapterInner {
                state: Mutex::new(AdapterState {
                    items,
                    selected: INVALID_POSITION,
                }),
                item_click: ListenerSlot::new(),
                item_long_click: ListenerSlot::new(),
                item_selected: ListenerSlot::new(),
            }),
        }
    }

    #[must_use]
    pub fn as_view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn count(&self) -> usize {
        lock(&self.inner.state).items.len()
    }

    /// Row id at `position`, or [`INVALID_ROW_ID`].
    #[must_use]
    pub fn item_id_at(&self, position: i32) -> i64 {
        let state = lock(&self.inner.state);
        usize::try_from(position)
            .ok()
            .and_then(|p| state.items.get(p).copied())
            .unwrap_or(INVALID_ROW_ID)
    }

    /// Selected position, or [`INVALID_POSITION`].
    #[must_use]
    pub fn selected_item_position(&self) -> i32 {
        lock(&self.inner.state).selected
    }

    /// Select `position`. The selection listener fires only on change.
    ///
    /// # Errors
    ///
    /// [`WidgetError::PositionOutOfRange`] if `position` is not in `0..count`.
    pub fn set_selection(&self, position: i32) -> Result<(), WidgetError> {
        let change = {
            let mut state = lock(&self.inner.state);
            let count = state.items.len();
            let id = usize::try_from(position)
                .ok()
                .and_then(|p| state.items.get(p).copied())
                .ok_or(WidgetError::PositionOutOfRange { position, count })?;
            if state.selected == position {
                return Ok(());
            }
            state.selected = position;
            SelectionChange::Selected(position, id)
        };
        self.fire_selection(change);
        Ok(())
    }

    /// Drop the selection. Fires `on_nothing_selected` if something was selected.
    pub fn clear_selection(&self) {
        let had = {
            let mut state = lock(&self.inner.state);
            std::mem::replace(&mut state.selected, INVALID_POSITION) != INVALID_POSITION
        };
        if had {
            self.fire_selection(SelectionChange::Nothing);
        }
    }

    /// Swap the adapter contents. A selection past the new end is cleared.
    pub fn set_items(&self, items: Vec<i64>) {
        let lost = {
            let mut state = lock(&self.inner.state);
            state.items = items;
            let out_of_range = usize::try_from(state.selected)
                .is_ok_and(|p| p >= state.items.len());
            if out_of_range {
                state.selected = INVALID_POSITION;
            }
            out_of_range
        };
        if lost {
            self.fire_selection(SelectionChange::Nothing);
        }
    }

    pub fn set_on_item_click_listener(&self, listener: Option<ItemClickListener>) {
        replace_slot(&self.inner.item_click, listener);
    }

    #[must_use]
    pub fn has_on_item_click_listener(&self) -> bool {
        self.inner.item_click.is_set()
    }

    pub fn set_on_item_long_click_listener(&self, listener: Option<ItemLongClickListener>) {
        replace_slot(&self.inner.item_long_click, listener);
    }

    #[must_use]
    pub fn has_on_item_long_click_listener(&self) -> bool {
        self.inner.item_long_click.is_set()
    }

    pub fn set_on_item_selected_listener(&self, listener: Option<Arc<dyn ItemSelectedListener>>) {
        replace_slot(&self.inner.item_selected, listener);
    }

    #[must_use]
    pub fn has_on_item_selected_listener(&self) -> bool {
        self.inner.item_selected.is_set()
    }

    /// Click the item at `position`. Returns whether a listener was invoked.
    pub fn perform_item_click(&self, position: i32) -> bool {
        let id = self.item_id_at(position);
        match self.inner.item_click.get() {
            Some(listener) => {
                listener(self, position, id);
                true
            }
            None => false,
        }
    }

    /// Long-press the item at `position`. Returns whether it was consumed.
    pub fn perform_item_long_click(&self, position: i32) -> bool {
        let id = self.item_id_at(position);
        self.inner
            .item_long_click
            .get()
            .is_some_and(|listener| listener(self, position, id))
    }

    fn fire_selection(&self, change: SelectionChange) {
        let Some(listener) = self.inner.item_selected.get() else {
            return;
        };
        match change {
            SelectionChange::Selected(position, id) => {
                listener.on_item_selected(self, position, id);
            }
            SelectionChange::Nothing => listener.on_nothing_selected(self),
        }
    }
}

impl EventSource for AdapterView {
    fn ui_thread(&self) -> UiThread {
        self.view.ui_thread()
    }
}

impl fmt::Debug for AdapterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.inner.state);
        f.debug_struct("AdapterView")
            .field("id", &self.view.id())
            .field("count", &state.items.len())
            .field("selected", &state.selected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Selections(Mutex<Vec<Option<(i32, i64)>>>);

    impl ItemSelectedListener for Selections {
        fn on_item_selected(&self, _: &AdapterView, position: i32, id: i64) {
            self.0.lock().unwrap().push(Some((position, id)));
        }
        fn on_nothing_selected(&self, _: &AdapterView) {
            self.0.lock().unwrap().push(None);
        }
    }

    #[test]
    fn starts_with_nothing_selected() {
        let view = AdapterView::with_count(3);
        assert_eq!(view.selected_item_position(), INVALID_POSITION);
        assert_eq!(view.item_id_at(INVALID_POSITION), INVALID_ROW_ID);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let view = AdapterView::with_count(3);
        assert_eq!(
            view.set_selection(3),
            Err(WidgetError::PositionOutOfRange { position: 3, count: 3 })
        );
        assert_eq!(
            view.set_selection(-2),
            Err(WidgetError::PositionOutOfRange { position: -2, count: 3 })
        );
        assert_eq!(view.selected_item_position(), INVALID_POSITION);
    }

    #[test]
    fn selection_listener_fires_on_change_only() {
        let view = AdapterView::new(vec![10, 20, 30]);
        let log = Arc::new(Selections::default());
        view.set_on_item_selected_listener(Some(log.clone()));
        view.set_selection(1).unwrap();
        view.set_selection(1).unwrap();
        view.set_selection(2).unwrap();
        view.clear_selection();
        assert_eq!(
            *log.0.lock().unwrap(),
            vec![Some((1, 20)), Some((2, 30)), None]
        );
    }

    #[test]
    fn shrinking_items_clears_selection() {
        let view = AdapterView::with_count(5);
        let log = Arc::new(Selections::default());
        view.set_selection(4).unwrap();
        view.set_on_item_selected_listener(Some(log.clone()));
        view.set_items(vec![0, 1]);
        assert_eq!(view.selected_item_position(), INVALID_POSITION);
        assert_eq!(*log.0.lock().unwrap(), vec![None]);
    }

    #[test]
    fn item_click_reports_position_and_id() {
        let view = AdapterView::new(vec![7, 8]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        view.set_on_item_click_listener(Some(Arc::new(move |_: &AdapterView, p: i32, id: i64| {
            s.lock().unwrap().push((p, id));
        })));
        assert!(view.perform_item_click(1));
        assert_eq!(*seen.lock().unwrap(), vec![(1, 8)]);
    }
}
