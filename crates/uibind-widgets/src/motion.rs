//! Pointer motion events delivered to touch and hover listeners.

/// Kind of pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionAction {
    Down,
    Move,
    Up,
    Cancel,
    HoverEnter,
    HoverMove,
    HoverExit,
}

impl MotionAction {
    /// Whether this action belongs to the hover family.
    #[must_use]
    pub const fn is_hover(self) -> bool {
        matches!(self, Self::HoverEnter | Self::HoverMove | Self::HoverExit)
    }
}

/// One pointer sample in view-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionEvent {
    pub action: MotionAction,
    pub x: f32,
    pub y: f32,
}

impl MotionEvent {
    #[must_use]
    pub const fn new(action: MotionAction, x: f32, y: f32) -> Self {
        Self { action, x, y }
    }
}
