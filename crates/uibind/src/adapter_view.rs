#![forbid(unsafe_code)]

//! Bindings for [`AdapterView`].
//!
//! Streams retain the view until disposed. The item-click, item-long-click
//! and item-selected slots each hold one listener.

use std::sync::Arc;

use uibind_runtime::{BridgeStream, Emitter, Handled, InitialValueStream, Sink, always_handled};
use uibind_widgets::{AdapterView, INVALID_POSITION, ItemSelectedListener, WidgetError};

use crate::events::{
    AdapterViewItemClickEvent, AdapterViewItemLongClickEvent, AdapterViewSelectionEvent,
};

struct ItemSelections(Emitter<i32>);

impl ItemSelectedListener for ItemSelections {
    fn on_item_selected(&self, _: &AdapterView, position: i32, _: i64) {
        self.0.emit(position);
    }

    fn on_nothing_selected(&self, _: &AdapterView) {
        self.0.emit(INVALID_POSITION);
    }
}

struct SelectionEvents(Emitter<AdapterViewSelectionEvent>);

impl ItemSelectedListener for SelectionEvents {
    fn on_item_selected(&self, view: &AdapterView, position: i32, id: i64) {
        self.0.emit(AdapterViewSelectionEvent::ItemSelected {
            view: view.as_view().id(),
            position,
            id,
        });
    }

    fn on_nothing_selected(&self, view: &AdapterView) {
        self.0.emit(AdapterViewSelectionEvent::NothingSelected {
            view: view.as_view().id(),
        });
    }
}

fn selection_stream<T, L>(
    view: &AdapterView,
    wrap: fn(Emitter<T>) -> L,
) -> BridgeStream<AdapterView, T>
where
    T: Send + 'static,
    L: ItemSelectedListener + 'static,
{
    BridgeStream::new(
        view.clone(),
        move |v: &AdapterView, emitter: Emitter<T>| {
            v.set_on_item_selected_listener(Some(Arc::new(wrap(emitter))));
        },
        |v: &AdapterView, ()| v.set_on_item_selected_listener(None),
    )
}

/// Selected position of `view`, [`INVALID_POSITION`] when nothing is
/// selected. Warm: emits the current selection first.
#[must_use]
pub fn item_selections(view: &AdapterView) -> InitialValueStream<AdapterView, i32> {
    selection_stream(view, ItemSelections).with_initial(AdapterView::selected_item_position)
}

/// Selection changes of `view` as events. Warm.
#[must_use]
pub fn selection_events(
    view: &AdapterView,
) -> InitialValueStream<AdapterView, AdapterViewSelectionEvent> {
    selection_stream(view, SelectionEvents).with_initial(|v: &AdapterView| {
        let view = v.as_view().id();
        match v.selected_item_position() {
            INVALID_POSITION => AdapterViewSelectionEvent::NothingSelected { view },
            position => AdapterViewSelectionEvent::ItemSelected {
                view,
                position,
                id: v.item_id_at(position),
            },
        }
    })
}

/// Clicked item positions. Cold.
#[must_use]
pub fn item_clicks(view: &AdapterView) -> BridgeStream<AdapterView, i32> {
    BridgeStream::new(
        view.clone(),
        |v: &AdapterView, emitter: Emitter<i32>| {
            v.set_on_item_click_listener(Some(Arc::new(
                move |_: &AdapterView, position: i32, _: i64| {
                    emitter.emit(position);
                },
            )));
        },
        |v: &AdapterView, ()| v.set_on_item_click_listener(None),
    )
}

/// Item clicks as events. Cold.
#[must_use]
pub fn item_click_events(
    view: &AdapterView,
) -> BridgeStream<AdapterView, AdapterViewItemClickEvent> {
    BridgeStream::new(
        view.clone(),
        |v: &AdapterView, emitter: Emitter<AdapterViewItemClickEvent>| {
            v.set_on_item_click_listener(Some(Arc::new(
                move |v: &AdapterView, position: i32, id: i64| {
                    emitter.emit(AdapterViewItemClickEvent {
                        view: v.as_view().id(),
                        position,
                        id,
                    });
                },
            )));
        },
        |v: &AdapterView, ()| v.set_on_item_click_listener(None),
    )
}

/// Long-pressed item positions, all reported as consumed. Cold.
#[must_use]
pub fn item_long_clicks(view: &AdapterView) -> BridgeStream<AdapterView, i32> {
    item_long_clicks_with(view, always_handled())
}

/// Long-pressed item positions; `handled` decides consumption. Cold.
#[must_use]
pub fn item_long_clicks_with(
    view: &AdapterView,
    handled: Handled<i32>,
) -> BridgeStream<AdapterView, i32> {
    BridgeStream::new(
        view.clone(),
        move |v: &AdapterView, emitter: Emitter<i32>| {
            let handled = Arc::clone(&handled);
            v.set_on_item_long_click_listener(Some(Arc::new(
                move |_: &AdapterView, position: i32, _: i64| {
                    emitter.emit_handled(position, &handled)
                },
            )));
        },
        |v: &AdapterView, ()| v.set_on_item_long_click_listener(None),
    )
}

/// Item long presses as events, all reported as consumed. Cold.
#[must_use]
pub fn item_long_click_events(
    view: &AdapterView,
) -> BridgeStream<AdapterView, AdapterViewItemLongClickEvent> {
    item_long_click_events_with(view, always_handled())
}

/// Item long presses as events; `handled` decides consumption. Cold.
#[must_use]
pub fn item_long_click_events_with(
    view: &AdapterView,
    handled: Handled<AdapterViewItemLongClickEvent>,
) -> BridgeStream<AdapterView, AdapterViewItemLongClickEvent> {
    BridgeStream::new(
        view.clone(),
        move |v: &AdapterView, emitter: Emitter<AdapterViewItemLongClickEvent>| {
            let handled = Arc::clone(&handled);
            v.set_on_item_long_click_listener(Some(Arc::new(
                move |v: &AdapterView, position: i32, id: i64| {
                    let event = AdapterViewItemLongClickEvent {
                        view: v.as_view().id(),
                        position,
                        id,
                    };
                    emitter.emit_handled(event, &handled)
                },
            )));
        },
        |v: &AdapterView, ()| v.set_on_item_long_click_listener(None),
    )
}

/// Selects a position of `view`. Out-of-range positions fail with
/// [`WidgetError::PositionOutOfRange`], passed through unchanged.
#[must_use]
pub fn selection(view: &AdapterView) -> Sink<i32, WidgetError> {
    Sink::bind(view.clone(), |v: &AdapterView, position: i32| v.set_selection(position))
}
