#![forbid(unsafe_code)]

//! Horizontally paged container.
//!
//! Page-change listeners use add/remove registration. Page transitions
//! report the scroll-state sequence a real pager produces:
//!
//! | Transition | Callbacks |
//! |------------|-----------|
//! | `set_current_item(p, false)` | selected(p), landed(p) |
//! | `set_current_item(p, true)` | Settling, scrolled(mid), selected(p), landed(p), Idle |
//! | `swipe_to(p)` | Dragging, scrolled(mid), Settling, selected(p), landed(p), Idle |
//!
//! `landed(p)` is the scroll callback for page `p` with a zero offset.

use std::fmt;
use std::sync::{Arc, Mutex};

use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerKey, ListenerList, UiThread};

use crate::error::WidgetError;
use crate::view::View;

/// Scroll state of a pager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    #[default]
    Idle,
    /// The user is dragging.
    Dragging,
    /// Animating to a final position.
    Settling,
}

/// Receives page transitions.
pub trait PageChangeListener: Send + Sync {
    /// `position` is the leftmost visible page; `offset` in `[0, 1)` of a page.
    fn on_page_scrolled(
        &self,
        _pager: &ViewPager,
        _position: usize,
        _offset: f32,
        _offset_px: i32,
    ) {
    }
    fn on_page_selected(&self, _pager: &ViewPager, _position: usize) {}
    fn on_page_scroll_state_changed(&self, _pager: &ViewPager, _state: ScrollState) {}
}

#[derive(Debug)]
struct PagerState {
    page_count: usize,
    page_width: i32,
    current: usize,
    scroll_state: ScrollState,
}

struct PagerInner {
    state: Mutex<PagerState>,
    listeners: ListenerList<Arc<dyn PageChangeListener>>,
}

#[derive(Clone)]
pub struct ViewPager {
    view: View,
    inner: Arc<PagerInner>,
}

#[derive(Clone, Copy)]
enum Callback {
    Scrolled(usize, f32, i32),
    Selected(usize),
    State(ScrollState),
}

impl ViewPager {
    /// Default page width in pixels.
    pub const DEFAULT_PAGE_WIDTH: i32 = 1080;

    #[must_use]
    pub fn new(page_count: usize) -> Self {
        Self::owned_by(UiThread::current(), page_count)
    }

    #[must_use]
    pub fn owned_by(thread: UiThread, page_count: usize) -> Self {
        Self {
            view: View::owned_by(thread),
            inner: Arc::new(PagerInner {
                state: Mutex::new(PagerState {
                    page_count,
                    page_width: Self::DEFAULT_PAGE_WIDTH,
                    current: 0,
                    scroll_state: ScrollState::Idle,
                }),
                listeners: ListenerList::new(),
            }),
        }
    }

    #[must_use]
    pub fn as_view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        lock(&self.inner.state).page_count
    }

    #[must_use]
    pub fn current_item(&self) -> usize {
        lock(&self.inner.state).current
    }

    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        lock(&self.inner.state).scroll_state
    }

    pub fn set_page_width(&self, width: i32) {
        lock(&self.inner.state).page_width = width;
    }

    /// Jump (or animate, with `smooth`) to `item`.
    ///
    /// # Errors
    ///
    /// [`WidgetError::PageOutOfRange`] if `item` is not in `0..page_count`.
    pub fn set_current_item(&self, item: usize, smooth: bool) -> Result<(), WidgetError> {
        let callbacks = {
            let mut state = lock(&self.inner.state);
            if item >= state.page_count {
                return Err(WidgetError::PageOutOfRange {
                    page: item,
                    count: state.page_count,
                });
            }
            if item == state.current {
                return Ok(());
            }
            if smooth {
                Self::animated(&mut state, item, false)
            } else {
                state.current = item;
                vec![Callback::Selected(item), Callback::Scrolled(item, 0.0, 0)]
            }
        };
        self.dispatch(callbacks);
        Ok(())
    }

    /// Simulate a user fling to `item`.
    ///
    /// # Errors
    ///
    /// [`WidgetError::PageOutOfRange`] if `item` is not in `0..page_count`.
    pub fn swipe_to(&self, item: usize) -> Result<(), WidgetError> {
        let callbacks = {
            let mut state = lock(&self.inner.state);
            if item >= state.page_count {
                return Err(WidgetError::PageOutOfRange {
                    page: item,
                    count: state.page_count,
                });
            }
            Self::animated(&mut state, item, true)
        };
        self.dispatch(callbacks);
        Ok(())
    }

    fn animated(state: &mut PagerState, item: usize, dragged: bool) -> Vec<Callback> {
        let from = state.current;
        let mut out = Vec::with_capacity(6);
        if dragged {
            out.push(Callback::State(ScrollState::Dragging));
        } else {
            out.push(Callback::State(ScrollState::Settling));
        }
        if from != item {
            out.push(Callback::Scrolled(from.min(item), 0.5, state.page_width / 2));
        }
        if dragged {
            out.push(Callback::State(ScrollState::Settling));
        }
        if from != item {
            out.push(Callback::Selected(item));
        }
        out.push(Callback::Scrolled(item, 0.0, 0));
        out.push(Callback::State(ScrollState::Idle));
        state.current = item;
        out
    }

    fn dispatch(&self, callbacks: Vec<Callback>) {
        let listeners = self.inner.listeners.snapshot();
        for callback in callbacks {
            if let Callback::State(s) = callback {
                lock(&self.inner.state).scroll_state = s;
            }
            for listener in &listeners {
                match callback {
                    Callback::Scrolled(p, offset, px) => {
                        listener.on_page_scrolled(self, p, offset, px);
                    }
                    Callback::Selected(p) => listener.on_page_selected(self, p),
                    Callback::State(s) => listener.on_page_scroll_state_changed(self, s),
                }
            }
        }
    }

    pub fn add_on_page_change_listener(
        &self,
        listener: Arc<dyn PageChangeListener>,
    ) -> ListenerKey {
        self.inner.listeners.add(listener)
    }

    pub fn remove_on_page_change_listener(&self, key: ListenerKey) -> bool {
        self.inner.listeners.remove(key).is_some()
    }

    #[must_use]
    pub fn page_change_listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl EventSource for ViewPager {
    fn ui_thread(&self) -> UiThread {
        self.view.ui_thread()
    }
}

impl fmt::Debug for ViewPager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.inner.state);
        f.debug_struct("ViewPager")
            .field("id", &self.view.id())
            .field("current", &state.current)
            .field("pages", &state.page_count)
            .field("scroll_state", &state.scroll_state)
            .finish()
    }
}
