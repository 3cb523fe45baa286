#![forbid(unsafe_code)]

//! Bindings for [`TextView`].
//!
//! Text watchers use add/remove registration, so several text streams may be
//! subscribed to one view at once; disposing one removes only its own
//! watcher. The editor-action listener is a single slot.
//!
//! Every stream retains the view until disposed.

use std::convert::Infallible;
use std::sync::Arc;

use uibind_core::ListenerKey;
use uibind_runtime::{BridgeStream, Emitter, Handled, InitialValueStream, Sink, always_handled};
use uibind_widgets::{TextView, TextWatcher};

use crate::events::{
    TextViewAfterTextChangeEvent, TextViewEditorActionEvent, TextViewTextChangeEvent,
};

struct TextChanges(Emitter<String>);

impl TextWatcher for TextChanges {
    fn on_text_changed(&self, _: &TextView, text: &str, _: usize, _: usize, _: usize) {
        self.0.emit(text.to_owned());
    }
}

struct TextChangeEvents(Emitter<TextViewTextChangeEvent>);

impl TextWatcher for TextChangeEvents {
    fn on_text_changed(
        &self,
        view: &TextView,
        text: &str,
        start: usize,
        before: usize,
        count: usize,
    ) {
        self.0.emit(TextViewTextChangeEvent {
            view: view.as_view().id(),
            text: text.to_owned(),
            start,
            before,
            count,
        });
    }
}

struct AfterTextChangeEvents(Emitter<TextViewAfterTextChangeEvent>);

impl TextWatcher for AfterTextChangeEvents {
    fn after_text_changed(&self, view: &TextView, text: &str) {
        self.0.emit(TextViewAfterTextChangeEvent {
            view: view.as_view().id(),
            text: text.to_owned(),
        });
    }
}

fn watcher_stream<T, W>(
    view: &TextView,
    wrap: fn(Emitter<T>) -> W,
) -> BridgeStream<TextView, T, ListenerKey>
where
    T: Send + 'static,
    W: TextWatcher + 'static,
{
    BridgeStream::new(
        view.clone(),
        move |v: &TextView, emitter: Emitter<T>| {
            v.add_text_changed_listener(Arc::new(wrap(emitter)))
        },
        |v: &TextView, key: ListenerKey| {
            v.remove_text_changed_listener(key);
        },
    )
}

/// Text of `view` after every edit. Warm: emits the current text first.
#[must_use]
pub fn text_changes(view: &TextView) -> InitialValueStream<TextView, String, ListenerKey> {
    watcher_stream(view, TextChanges).with_initial(TextView::text)
}

/// Edits of `view` with their ranges. Warm: the first event carries the
/// current text with an empty range.
#[must_use]
pub fn text_change_events(
    view: &TextView,
) -> InitialValueStream<TextView, TextViewTextChangeEvent, ListenerKey> {
    watcher_stream(view, TextChangeEvents).with_initial(|v: &TextView| TextViewTextChangeEvent {
        view: v.as_view().id(),
        text: v.text(),
        start: 0,
        before: 0,
        count: 0,
    })
}

/// Completed edits of `view`. Warm: emits the current text first.
#[must_use]
pub fn after_text_change_events(
    view: &TextView,
) -> InitialValueStream<TextView, TextViewAfterTextChangeEvent, ListenerKey> {
    watcher_stream(view, AfterTextChangeEvents).with_initial(|v: &TextView| {
        TextViewAfterTextChangeEvent {
            view: v.as_view().id(),
            text: v.text(),
        }
    })
}

/// IME action ids on `view`, all reported as consumed. Cold.
#[must_use]
pub fn editor_actions(view: &TextView) -> BridgeStream<TextView, i32> {
    editor_actions_with(view, always_handled())
}

/// IME action ids on `view`; `handled` decides consumption per action. Cold.
#[must_use]
pub fn editor_actions_with(view: &TextView, handled: Handled<i32>) -> BridgeStream<TextView, i32> {
    BridgeStream::new(
        view.clone(),
        move |v: &TextView, emitter: Emitter<i32>| {
            let handled = Arc::clone(&handled);
            v.set_on_editor_action_listener(Some(Arc::new(move |_: &TextView, action_id: i32| {
                emitter.emit_handled(action_id, &handled)
            })));
        },
        |v: &TextView, ()| v.set_on_editor_action_listener(None),
    )
}

/// IME actions on `view` as events, all reported as consumed. Cold.
#[must_use]
pub fn editor_action_events(view: &TextView) -> BridgeStream<TextView, TextViewEditorActionEvent> {
    editor_action_events_with(view, always_handled())
}

/// IME actions on `view` as events; `handled` decides consumption. Cold.
#[must_use]
pub fn editor_action_events_with(
    view: &TextView,
    handled: Handled<TextViewEditorActionEvent>,
) -> BridgeStream<TextView, TextViewEditorActionEvent> {
    BridgeStream::new(
        view.clone(),
        move |v: &TextView, emitter: Emitter<TextViewEditorActionEvent>| {
            let handled = Arc::clone(&handled);
            v.set_on_editor_action_listener(Some(Arc::new(move |v: &TextView, action_id: i32| {
                let event = TextViewEditorActionEvent {
                    view: v.as_view().id(),
                    action_id,
                };
                emitter.emit_handled(event, &handled)
            })));
        },
        |v: &TextView, ()| v.set_on_editor_action_listener(None),
    )
}

/// Replaces the text of `view`.
#[must_use]
pub fn text(view: &TextView) -> Sink<String, Infallible> {
    Sink::bind(view.clone(), |v: &TextView, text: String| {
        v.set_text(text);
        Ok(())
    })
}
