#![forbid(unsafe_code)]

//! Bindings for [`PopupMenu`]. Streams retain the menu until disposed.

use std::sync::Arc;

use uibind_runtime::{BridgeStream, Emitter};
use uibind_widgets::{MenuItem, PopupMenu};

/// Clicked menu items. Cold.
///
/// A click is reported as consumed while the subscription is live.
#[must_use]
pub fn item_clicks(menu: &PopupMenu) -> BridgeStream<PopupMenu, MenuItem> {
    BridgeStream::new(
        menu.clone(),
        |m: &PopupMenu, emitter: Emitter<MenuItem>| {
            m.set_on_menu_item_click_listener(Some(Arc::new(move |item: &MenuItem| {
                emitter.emit(item.clone())
            })));
        },
        |m: &PopupMenu, ()| m.set_on_menu_item_click_listener(None),
    )
}

/// Dismissals of `menu`. Cold.
#[must_use]
pub fn dismisses(menu: &PopupMenu) -> BridgeStream<PopupMenu, ()> {
    BridgeStream::new(
        menu.clone(),
        |m: &PopupMenu, emitter: Emitter<()>| {
            m.set_on_dismiss_listener(Some(Arc::new(move |_: &PopupMenu| {
                emitter.emit(());
            })));
        },
        |m: &PopupMenu, ()| m.set_on_dismiss_listener(None),
    )
}
