#![forbid(unsafe_code)]

//! Bindings for [`View`].
//!
//! Every stream retains a strong reference to the view until its
//! subscription is disposed. Every sink retains the view for as long as the
//! sink lives.
//!
//! The click, long-click, focus, touch and hover slots each hold one
//! listener. A second subscription to the same kind supersedes the first.

use std::convert::Infallible;
use std::sync::Arc;

use uibind_core::BindError;
use uibind_runtime::{BridgeStream, Emitter, Handled, InitialValueStream, Sink, always_handled};
use uibind_widgets::{MotionEvent, View, ViewId, Visibility};

use crate::events::{
    ViewClickEvent, ViewFocusChangeEvent, ViewHoverEvent, ViewLongClickEvent, ViewTouchEvent,
};

/// Clicks on `view`, one `()` per click. Cold.
#[must_use]
pub fn clicks(view: &View) -> BridgeStream<View, ()> {
    BridgeStream::new(
        view.clone(),
        |v: &View, emitter: Emitter<()>| {
            v.set_on_click_listener(Some(Arc::new(move |_: &View| {
                emitter.emit(());
            })));
        },
        |v: &View, ()| v.set_on_click_listener(None),
    )
}

/// Clicks on `view` as events naming the view. Cold.
#[must_use]
pub fn click_events(view: &View) -> BridgeStream<View, ViewClickEvent> {
    BridgeStream::new(
        view.clone(),
        |v: &View, emitter: Emitter<ViewClickEvent>| {
            v.set_on_click_listener(Some(Arc::new(move |v: &View| {
                emitter.emit(ViewClickEvent { view: v.id() });
            })));
        },
        |v: &View, ()| v.set_on_click_listener(None),
    )
}

/// Long presses on `view`, always reported as consumed. Cold.
#[must_use]
pub fn long_clicks(view: &View) -> BridgeStream<View, ()> {
    long_clicks_with(view, always_handled())
}

/// Long presses on `view`. Cold.
///
/// `handled` runs on every press; its result is what the view reports as
/// "consumed". The press is forwarded either way. If `handled` fails, the
/// subscription terminates with [`BindError::Callback`] and the view sees
/// "not consumed".
#[must_use]
pub fn long_clicks_with(view: &View, handled: Handled<()>) -> BridgeStream<View, ()> {
    BridgeStream::new(
        view.clone(),
        move |v: &View, emitter: Emitter<()>| {
            let handled = Arc::clone(&handled);
            v.set_on_long_click_listener(Some(Arc::new(move |_: &View| {
                emitter.emit_handled((), &handled)
            })));
        },
        |v: &View, ()| v.set_on_long_click_listener(None),
    )
}

/// Long presses on `view` as events, always reported as consumed. Cold.
#[must_use]
pub fn long_click_events(view: &View) -> BridgeStream<View, ViewLongClickEvent> {
    long_click_events_with(view, always_handled())
}

/// Long presses on `view` as events. Cold. See [`long_clicks_with`].
#[must_use]
pub fn long_click_events_with(
    view: &View,
    handled: Handled<ViewLongClickEvent>,
) -> BridgeStream<View, ViewLongClickEvent> {
    BridgeStream::new(
        view.clone(),
        move |v: &View, emitter: Emitter<ViewLongClickEvent>| {
            let handled = Arc::clone(&handled);
            v.set_on_long_click_listener(Some(Arc::new(move |v: &View| {
                emitter.emit_handled(ViewLongClickEvent { view: v.id() }, &handled)
            })));
        },
        |v: &View, ()| v.set_on_long_click_listener(None),
    )
}

/// Focus state of `view`. Warm: emits `has_focus()` on subscribe.
#[must_use]
pub fn focus_changes(view: &View) -> InitialValueStream<View, bool> {
    BridgeStream::new(
        view.clone(),
        |v: &View, emitter: Emitter<bool>| {
            v.set_on_focus_change_listener(Some(Arc::new(move |_: &View, focused: bool| {
                emitter.emit(focused);
            })));
        },
        |v: &View, ()| v.set_on_focus_change_listener(None),
    )
    .with_initial(View::has_focus)
}

/// Focus changes of `view` as events. Warm.
#[must_use]
pub fn focus_change_events(view: &View) -> InitialValueStream<View, ViewFocusChangeEvent> {
    BridgeStream::new(
        view.clone(),
        |v: &View, emitter: Emitter<ViewFocusChangeEvent>| {
            v.set_on_focus_change_listener(Some(Arc::new(move |v: &View, has_focus: bool| {
                emitter.emit(ViewFocusChangeEvent {
                    view: v.id(),
                    has_focus,
                });
            })));
        },
        |v: &View, ()| v.set_on_focus_change_listener(None),
    )
    .with_initial(|v: &View| ViewFocusChangeEvent {
        view: v.id(),
        has_focus: v.has_focus(),
    })
}

/// Touch motions on `view`, all reported as consumed. Cold.
#[must_use]
pub fn touches(view: &View) -> BridgeStream<View, MotionEvent> {
    touches_with(view, always_handled())
}

/// Touch motions on `view`; `handled` decides consumption per motion. Cold.
#[must_use]
pub fn touches_with(
    view: &View,
    handled: Handled<MotionEvent>,
) -> BridgeStream<View, MotionEvent> {
    BridgeStream::new(
        view.clone(),
        move |v: &View, emitter: Emitter<MotionEvent>| {
            let listener = motion_listener(emitter, Arc::clone(&handled), |_, motion| motion);
            v.set_on_touch_listener(Some(listener));
        },
        |v: &View, ()| v.set_on_touch_listener(None),
    )
}

/// Hover motions on `view`, all reported as consumed. Cold.
#[must_use]
pub fn hovers(view: &View) -> BridgeStream<View, MotionEvent> {
    hovers_with(view, always_handled())
}

/// Hover motions on `view`; `handled` decides consumption per motion. Cold.
#[must_use]
pub fn hovers_with(
    view: &View,
    handled: Handled<MotionEvent>,
) -> BridgeStream<View, MotionEvent> {
    BridgeStream::new(
        view.clone(),
        move |v: &View, emitter: Emitter<MotionEvent>| {
            let listener = motion_listener(emitter, Arc::clone(&handled), |_, motion| motion);
            v.set_on_hover_listener(Some(listener));
        },
        |v: &View, ()| v.set_on_hover_listener(None),
    )
}

/// Touch motions on `view` as events, all reported as consumed. Cold.
#[must_use]
pub fn touch_events(view: &View) -> BridgeStream<View, ViewTouchEvent> {
    touch_events_with(view, always_handled())
}

/// Touch motions on `view` as events; `handled` decides consumption. Cold.
#[must_use]
pub fn touch_events_with(
    view: &View,
    handled: Handled<ViewTouchEvent>,
) -> BridgeStream<View, ViewTouchEvent> {
    BridgeStream::new(
        view.clone(),
        move |v: &View, emitter: Emitter<ViewTouchEvent>| {
            let listener = motion_listener(emitter, Arc::clone(&handled), |view, motion| {
                ViewTouchEvent { view, motion }
            });
            v.set_on_touch_listener(Some(listener));
        },
        |v: &View, ()| v.set_on_touch_listener(None),
    )
}

/// Hover motions on `view` as events, all reported as consumed. Cold.
#[must_use]
pub fn hover_events(view: &View) -> BridgeStream<View, ViewHoverEvent> {
    hover_events_with(view, always_handled())
}

/// Hover motions on `view` as events; `handled` decides consumption. Cold.
#[must_use]
pub fn hover_events_with(
    view: &View,
    handled: Handled<ViewHoverEvent>,
) -> BridgeStream<View, ViewHoverEvent> {
    BridgeStream::new(
        view.clone(),
        move |v: &View, emitter: Emitter<ViewHoverEvent>| {
            let listener = motion_listener(emitter, Arc::clone(&handled), |view, motion| {
                ViewHoverEvent { view, motion }
            });
            v.set_on_hover_listener(Some(listener));
        },
        |v: &View, ()| v.set_on_hover_listener(None),
    )
}

fn motion_listener<T: Clone + Send + 'static>(
    emitter: Emitter<T>,
    handled: Handled<T>,
    wrap: fn(ViewId, MotionEvent) -> T,
) -> uibind_widgets::view::MotionListener {
    Arc::new(move |v: &View, event: &MotionEvent| {
        emitter.emit_handled(wrap(v.id(), *event), &handled)
    })
}

// ── Sinks ───────────────────────────────────────────────────────────────

/// Sets the activated state of `view`.
#[must_use]
pub fn activated(view: &View) -> Sink<bool, Infallible> {
    flag_sink(view, View::set_activated)
}

/// Sets whether `view` is clickable.
#[must_use]
pub fn clickable(view: &View) -> Sink<bool, Infallible> {
    flag_sink(view, View::set_clickable)
}

/// Enables or disables `view`.
#[must_use]
pub fn enabled(view: &View) -> Sink<bool, Infallible> {
    flag_sink(view, View::set_enabled)
}

/// Sets the pressed state of `view`.
#[must_use]
pub fn pressed(view: &View) -> Sink<bool, Infallible> {
    flag_sink(view, View::set_pressed)
}

/// Sets the selected state of `view`.
#[must_use]
pub fn selected(view: &View) -> Sink<bool, Infallible> {
    flag_sink(view, View::set_selected)
}

/// Shows `view` on `true`, hides it with [`Visibility::Gone`] on `false`.
#[must_use]
pub fn visibility(view: &View) -> Sink<bool, Infallible> {
    visibility_sink(view, Visibility::Gone)
}

/// Shows `view` on `true`, applies `when_false` on `false`.
///
/// # Errors
///
/// [`BindError::InvalidArgument`] if `when_false` is [`Visibility::Visible`];
/// such a sink could never hide the view. The view is not touched.
pub fn visibility_with(
    view: &View,
    when_false: Visibility,
) -> Result<Sink<bool, Infallible>, BindError> {
    if when_false == Visibility::Visible {
        return Err(BindError::invalid_argument(
            "setting visibility to Visible when false would have no effect",
        ));
    }
    Ok(visibility_sink(view, when_false))
}

fn visibility_sink(view: &View, when_false: Visibility) -> Sink<bool, Infallible> {
    Sink::bind(view.clone(), move |v: &View, visible: bool| {
        v.set_visibility(if visible { Visibility::Visible } else { when_false });
        Ok(())
    })
}

fn flag_sink(view: &View, set: fn(&View, bool)) -> Sink<bool, Infallible> {
    Sink::bind(view.clone(), move |v: &View, on: bool| {
        set(v, on);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use uibind_core::BoxError;
    use uibind_widgets::MotionAction;

    #[test]
    fn click_stream_forwards_until_disposed() {
        let view = View::new();
        let (seen, observer) = record();
        let handle = clicks(&view).subscribe(observer);
        assert!(seen.lock().unwrap().is_empty());
        assert!(view.perform_click());
        handle.dispose();
        assert!(!view.perform_click());
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(!view.has_on_click_listener());
    }

    #[test]
    fn long_click_reports_predicate_result_and_still_forwards() {
        let view = View::new();
        let (seen, observer) = record();
        let never = uibind_runtime::handled_when(|_: &()| false);
        let _handle = long_clicks_with(&view, never).subscribe(observer);
        assert!(!view.perform_long_click());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn long_click_predicate_error_terminates() {
        let view = View::new();
        let (seen, observer) = record();
        let failing: Handled<()> =
            Arc::new(|_: &()| -> Result<bool, BoxError> { Err("boom".into()) });
        let handle = long_clicks_with(&view, failing).subscribe(observer);
        assert!(!view.perform_long_click());
        assert!(handle.is_disposed());
        assert!(!view.has_on_long_click_listener());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn focus_changes_start_with_current_focus() {
        let view = View::new();
        view.request_focus();
        let (seen, observer) = record();
        let handle = focus_changes(&view).subscribe(observer);
        view.clear_focus();
        handle.dispose();
        view.request_focus();
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn focus_change_events_carry_view_id() {
        let view = View::new();
        let (seen, observer) = record();
        let _handle = focus_change_events(&view).subscribe(observer);
        view.request_focus();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ViewFocusChangeEvent { view: view.id(), has_focus: false },
                ViewFocusChangeEvent { view: view.id(), has_focus: true },
            ]
        );
    }

    #[test]
    fn touches_with_filters_consumption_not_delivery() {
        let view = View::new();
        let (seen, observer) = record();
        let handled =
            uibind_runtime::handled_when(|e: &MotionEvent| e.action == MotionAction::Down);
        let _handle = touches_with(&view, handled).subscribe(observer);
        assert!(view.dispatch_touch_event(&MotionEvent::new(MotionAction::Down, 0.0, 0.0)));
        assert!(!view.dispatch_touch_event(&MotionEvent::new(MotionAction::Up, 0.0, 0.0)));
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn hovers_bind_the_hover_slot() {
        let view = View::new();
        let (seen, observer) = record();
        let handle = hovers(&view).subscribe(observer);
        assert!(view.has_on_hover_listener());
        assert!(!view.has_on_touch_listener());
        view.dispatch_hover_event(&MotionEvent::new(MotionAction::HoverEnter, 3.0, 4.0));
        handle.dispose();
        assert!(!view.has_on_hover_listener());
        assert_eq!(seen.lock().unwrap()[0].x, 3.0);
    }

    #[test]
    fn click_events_name_the_view() {
        let view = View::new();
        let (seen, observer) = record();
        let handle = click_events(&view).subscribe(observer);
        assert!(seen.lock().unwrap().is_empty());
        view.perform_click();
        view.perform_click();
        handle.dispose();
        assert!(!view.perform_click());
        let expected = ViewClickEvent { view: view.id() };
        assert_eq!(*seen.lock().unwrap(), vec![expected, expected]);
    }

    #[test]
    fn long_click_events_report_consumed_until_disposed() {
        let view = View::new();
        let (seen, observer) = record();
        let handle = long_click_events(&view).subscribe(observer);
        assert!(seen.lock().unwrap().is_empty());
        assert!(view.perform_long_click());
        assert!(view.perform_long_click());
        handle.dispose();
        assert!(!view.perform_long_click());
        let expected = ViewLongClickEvent { view: view.id() };
        assert_eq!(*seen.lock().unwrap(), vec![expected, expected]);
    }

    #[test]
    fn long_click_events_with_sees_the_event() {
        let view = View::new();
        let id = view.id();
        let (seen, observer) = record();
        let handled = uibind_runtime::handled_when(move |e: &ViewLongClickEvent| e.view != id);
        let _handle = long_click_events_with(&view, handled).subscribe(observer);
        assert!(!view.perform_long_click());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn touch_events_carry_motion() {
        let view = View::new();
        let (seen, observer) = record();
        let handle = touch_events(&view).subscribe(observer);
        assert!(seen.lock().unwrap().is_empty());
        let down = MotionEvent::new(MotionAction::Down, 1.0, 2.0);
        let up = MotionEvent::new(MotionAction::Up, 1.0, 2.0);
        assert!(view.dispatch_touch_event(&down));
        assert!(view.dispatch_touch_event(&up));
        handle.dispose();
        assert!(!view.dispatch_touch_event(&down));
        assert!(!view.has_on_touch_listener());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ViewTouchEvent { view: view.id(), motion: down },
                ViewTouchEvent { view: view.id(), motion: up },
            ]
        );
    }

    #[test]
    fn touch_events_with_predicate_error_forwards_then_terminates() {
        let view = View::new();
        let (seen, observer) = record();
        let failing: Handled<ViewTouchEvent> =
            Arc::new(|_: &ViewTouchEvent| -> Result<bool, BoxError> { Err("boom".into()) });
        let handle = touch_events_with(&view, failing).subscribe(observer);
        let down = MotionEvent::new(MotionAction::Down, 0.0, 0.0);
        assert!(!view.dispatch_touch_event(&down));
        assert!(handle.is_disposed());
        assert!(!view.has_on_touch_listener());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn hover_events_bind_the_hover_slot() {
        let view = View::new();
        let (seen, observer) = record();
        let handle = hover_events(&view).subscribe(observer);
        assert!(seen.lock().unwrap().is_empty());
        assert!(!view.has_on_touch_listener());
        let enter = MotionEvent::new(MotionAction::HoverEnter, 3.0, 4.0);
        let exit = MotionEvent::new(MotionAction::HoverExit, 5.0, 6.0);
        view.dispatch_hover_event(&enter);
        view.dispatch_hover_event(&exit);
        handle.dispose();
        view.dispatch_hover_event(&enter);
        assert!(!view.has_on_hover_listener());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ViewHoverEvent { view: view.id(), motion: enter },
                ViewHoverEvent { view: view.id(), motion: exit },
            ]
        );
    }

    #[test]
    fn flag_sinks_apply() {
        let view = View::new();
        enabled(&view).set(false);
        selected(&view).set(true);
        activated(&view).set(true);
        pressed(&view).set(true);
        clickable(&view).set(true);
        assert!(!view.is_enabled());
        assert!(view.is_selected() && view.is_activated());
        assert!(view.is_pressed() && view.is_clickable());
    }

    #[test]
    fn visibility_sink_uses_false_target() {
        let view = View::new();
        visibility(&view).set(false);
        assert_eq!(view.visibility(), Visibility::Gone);
        let sink = visibility_with(&view, Visibility::Invisible).unwrap();
        sink.set(true);
        assert_eq!(view.visibility(), Visibility::Visible);
        sink.set(false);
        assert_eq!(view.visibility(), Visibility::Invisible);
    }

    #[test]
    fn visibility_with_visible_target_is_rejected() {
        let view = View::new();
        view.set_visibility(Visibility::Invisible);
        let err = visibility_with(&view, Visibility::Visible).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(view.visibility(), Visibility::Invisible);
    }
}
