#![forbid(unsafe_code)]

//! Bindings for [`NestedScrollView`].

use std::sync::Arc;

use uibind_runtime::{BridgeStream, Emitter};
use uibind_widgets::{NestedScrollView, ScrollOffset};

use crate::events::ViewScrollChangeEvent;

/// Scroll offset changes of `view`. Cold; retains the view until disposed.
#[must_use]
pub fn scroll_change_events(
    view: &NestedScrollView,
) -> BridgeStream<NestedScrollView, ViewScrollChangeEvent> {
    BridgeStream::new(
        view.clone(),
        |v: &NestedScrollView, emitter: Emitter<ViewScrollChangeEvent>| {
            v.set_on_scroll_change_listener(Some(Arc::new(
                move |v: &NestedScrollView, scroll: ScrollOffset, old_scroll: ScrollOffset| {
                    emitter.emit(ViewScrollChangeEvent {
                        view: v.as_view().id(),
                        scroll,
                        old_scroll,
                    });
                },
            )));
        },
        |v: &NestedScrollView, ()| v.set_on_scroll_change_listener(None),
    )
}
