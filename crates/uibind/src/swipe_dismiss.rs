#![forbid(unsafe_code)]

//! Bindings for [`SwipeDismissBehavior`].

use std::sync::Arc;

use uibind_runtime::{BridgeStream, Emitter};
use uibind_widgets::{SwipeDismissBehavior, View, ViewId};

/// Ids of views swiped away under `behavior`. Cold; retains the behavior
/// (and its view) until disposed.
#[must_use]
pub fn dismisses(behavior: &SwipeDismissBehavior) -> BridgeStream<SwipeDismissBehavior, ViewId> {
    BridgeStream::new(
        behavior.clone(),
        |b: &SwipeDismissBehavior, emitter: Emitter<ViewId>| {
            b.set_listener(Some(Arc::new(move |view: &View| {
                emitter.emit(view.id());
            })));
        },
        |b: &SwipeDismissBehavior, ()| b.set_listener(None),
    )
}
