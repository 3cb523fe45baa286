#![forbid(unsafe_code)]

//! Bindings for [`ViewPager`].
//!
//! Page-change listeners use add/remove registration; every stream adds its
//! own listener and removes only that one on dispose. Streams retain the
//! pager until disposed.

use std::sync::Arc;

use uibind_core::ListenerKey;
use uibind_runtime::{BridgeStream, Emitter, InitialValueStream, Sink};
use uibind_widgets::{PageChangeListener, ScrollState, ViewPager, WidgetError};

use crate::events::ViewPagerPageScrollEvent;

struct PageScrolls(Emitter<ViewPagerPageScrollEvent>);

impl PageChangeListener for PageScrolls {
    fn on_page_scrolled(&self, pager: &ViewPager, position: usize, offset: f32, offset_px: i32) {
        self.0.emit(ViewPagerPageScrollEvent {
            view: pager.as_view().id(),
            position,
            offset,
            offset_px,
        });
    }
}

struct ScrollStates(Emitter<ScrollState>);

impl PageChangeListener for ScrollStates {
    fn on_page_scroll_state_changed(&self, _: &ViewPager, state: ScrollState) {
        self.0.emit(state);
    }
}

struct PageSelections(Emitter<usize>);

impl PageChangeListener for PageSelections {
    fn on_page_selected(&self, _: &ViewPager, position: usize) {
        self.0.emit(position);
    }
}

fn page_stream<T, L>(
    pager: &ViewPager,
    wrap: fn(Emitter<T>) -> L,
) -> BridgeStream<ViewPager, T, ListenerKey>
where
    T: Send + 'static,
    L: PageChangeListener + 'static,
{
    BridgeStream::new(
        pager.clone(),
        move |p: &ViewPager, emitter: Emitter<T>| {
            p.add_on_page_change_listener(Arc::new(wrap(emitter)))
        },
        |p: &ViewPager, key: ListenerKey| {
            p.remove_on_page_change_listener(key);
        },
    )
}

/// Scroll progress of `pager`. Cold.
#[must_use]
pub fn page_scroll_events(
    pager: &ViewPager,
) -> BridgeStream<ViewPager, ViewPagerPageScrollEvent, ListenerKey> {
    page_stream(pager, PageScrolls)
}

/// Scroll state transitions of `pager`. Cold.
#[must_use]
pub fn page_scroll_state_changes(
    pager: &ViewPager,
) -> BridgeStream<ViewPager, ScrollState, ListenerKey> {
    page_stream(pager, ScrollStates)
}

/// Selected page of `pager`. Warm: emits the current page first.
#[must_use]
pub fn page_selections(pager: &ViewPager) -> InitialValueStream<ViewPager, usize, ListenerKey> {
    page_stream(pager, PageSelections).with_initial(ViewPager::current_item)
}

/// Jumps `pager` to a page without animation. Out-of-range pages fail with
/// [`WidgetError::PageOutOfRange`].
#[must_use]
pub fn current_item(pager: &ViewPager) -> Sink<usize, WidgetError> {
    Sink::bind(pager.clone(), |p: &ViewPager, item: usize| p.set_current_item(item, false))
}
