//! Common imports for binding code.
//!
//! ```ignore
//! use uibind::prelude::*;
//! ```

pub use uibind_core::{BindError, Disposable, Observer};
pub use uibind_runtime::{
    BridgeStream, DisposeScope, Handled, InitialValueStream, Sink, Subscribe, always_handled,
    handled_when,
};
pub use uibind_widgets::{
    AdapterView, MotionEvent, NestedScrollView, PopupMenu, SearchBar, SearchView,
    SwipeDismissBehavior, TextView, View, ViewPager, Visibility,
};

pub use crate::{
    adapter_view, nested_scroll_view, popup_menu, search_bar, search_view, swipe_dismiss,
    text_view, view, view_pager,
};
