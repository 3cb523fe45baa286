//! `proptest` strategies for widget inputs.

use proptest::prelude::*;
use uibind_widgets::{MotionAction, MotionEvent};

/// Any motion action.
pub fn motion_action() -> impl Strategy<Value = MotionAction> {
    prop_oneof![
        Just(MotionAction::Down),
        Just(MotionAction::Move),
        Just(MotionAction::Up),
        Just(MotionAction::Cancel),
        Just(MotionAction::HoverEnter),
        Just(MotionAction::HoverMove),
        Just(MotionAction::HoverExit),
    ]
}

/// Motion events inside a 1080x1920 view.
pub fn motion_event() -> impl Strategy<Value = MotionEvent> {
    (motion_action(), 0.0f32..1080.0, 0.0f32..1920.0)
        .prop_map(|(action, x, y)| MotionEvent::new(action, x, y))
}

/// Short printable strings, as typed into a text field.
pub fn typed_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 é]{0,12}"
}
