#![forbid(unsafe_code)]

//! Event payloads: plain immutable values, no behavior.
//!
//! Payloads name their widget by [`ViewId`] rather than holding a handle, so
//! a buffered event never keeps a widget alive.

use uibind_widgets::{MotionEvent, ScrollOffset, ViewId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewClickEvent {
    pub view: ViewId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewLongClickEvent {
    pub view: ViewId,
}

/// A touch motion and the view it landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewTouchEvent {
    pub view: ViewId,
    pub motion: MotionEvent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewHoverEvent {
    pub view: ViewId,
    pub motion: MotionEvent,
}

/// Focus gained or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewFocusChangeEvent {
    pub view: ViewId,
    pub has_focus: bool,
}

/// `count` chars at `start` replaced `before` old chars; `text` is the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextViewTextChangeEvent {
    pub view: ViewId,
    pub text: String,
    pub start: usize,
    pub before: usize,
    pub count: usize,
}

/// Text after an edit completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextViewAfterTextChangeEvent {
    pub view: ViewId,
    pub text: String,
}

/// IME action on a text view; see [`uibind_widgets::ime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextViewEditorActionEvent {
    pub view: ViewId,
    pub action_id: i32,
}

/// Selection state of an adapter view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AdapterViewSelectionEvent {
    ItemSelected { view: ViewId, position: i32, id: i64 },
    NothingSelected { view: ViewId },
}

impl AdapterViewSelectionEvent {
    #[must_use]
    pub const fn view(&self) -> ViewId {
        match *self {
            Self::ItemSelected { view, .. } | Self::NothingSelected { view } => view,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdapterViewItemClickEvent {
    pub view: ViewId,
    pub position: i32,
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdapterViewItemLongClickEvent {
    pub view: ViewId,
    pub position: i32,
    pub id: i64,
}

/// Query edited, or submitted when `submitted` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchViewQueryTextEvent {
    pub view: ViewId,
    pub query: String,
    pub submitted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchQueryKind {
    Changed,
    Submitted,
    KeyboardDismissed,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchBarSearchQueryEvent {
    pub view: ViewId,
    pub query: String,
    pub kind: SearchQueryKind,
}

/// Pager scroll progress: leftmost visible `position` plus a page fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewPagerPageScrollEvent {
    pub view: ViewId,
    pub position: usize,
    pub offset: f32,
    pub offset_px: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewScrollChangeEvent {
    pub view: ViewId,
    pub scroll: ScrollOffset,
    pub old_scroll: ScrollOffset,
}
