#![forbid(unsafe_code)]

//! In-memory widget toolkit for uibind.
//!
//! Each widget is a cheap `Clone + Send + Sync` handle that records the
//! thread that created it as its owner ([`UiThread`](uibind_core::UiThread))
//! and exposes:
//!
//! - single-slot listener registration (`set_on_*_listener(Some(..))`
//!   supersedes, `None` clears), or add/remove registration where a real
//!   toolkit allows several listeners;
//! - current-state accessors;
//! - setters, fallible where a real toolkit would reject the argument;
//! - native event simulators (`perform_click`, `set_text`, `swipe_to`, ...)
//!   that invoke the installed listeners synchronously on the caller's
//!   thread.
//!
//! Nothing is rendered. Listeners are always invoked with no widget lock
//! held, so a listener may clear its own slot.

pub mod adapter_view;
pub mod error;
pub mod motion;
pub mod nested_scroll_view;
pub mod popup_menu;
pub mod search_bar;
pub mod search_view;
pub mod swipe_dismiss;
pub mod text_view;
pub mod view;
pub mod view_pager;

pub use adapter_view::{AdapterView, INVALID_POSITION, INVALID_ROW_ID, ItemSelectedListener};
pub use error::WidgetError;
pub use motion::{MotionAction, MotionEvent};
pub use nested_scroll_view::{NestedScrollView, ScrollOffset};
pub use popup_menu::{MenuItem, PopupMenu};
pub use search_bar::{SearchBar, SearchBarListener};
pub use search_view::{QueryTextListener, SearchView};
pub use swipe_dismiss::SwipeDismissBehavior;
pub use text_view::{TextView, TextWatcher, ime};
pub use view::{View, ViewFlags, ViewId, Visibility};
pub use view_pager::{PageChangeListener, ScrollState, ViewPager};
