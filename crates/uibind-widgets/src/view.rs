#![forbid(unsafe_code)]

//! Base widget: state flags, visibility, and the per-view listener slots.
//!
//! Every slot holds at most one listener. Installing a listener replaces the
//! previous one; passing `None` clears the slot. The native simulators
//! (`perform_click`, `dispatch_touch_event`, ...) clone the listener out and
//! release all locks before invoking it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bitflags::bitflags;
use uibind_core::sync::lock;
use uibind_core::{EventSource, ListenerSlot, UiThread};

use crate::motion::MotionEvent;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

bitflags! {
    /// Boolean view state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u16 {
        const ENABLED        = 1 << 0;
        const CLICKABLE      = 1 << 1;
        const LONG_CLICKABLE = 1 << 2;
        const FOCUSABLE      = 1 << 3;
        const FOCUSED        = 1 << 4;
        const PRESSED        = 1 << 5;
        const SELECTED       = 1 << 6;
        const ACTIVATED      = 1 << 7;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::ENABLED | Self::FOCUSABLE
    }
}

/// Whether a view is drawn and whether it takes up layout space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    #[default]
    Visible,
    /// Not drawn, still occupies space.
    Invisible,
    /// Not drawn, no space.
    Gone,
}

pub type ClickListener = Arc<dyn Fn(&View) + Send + Sync>;
/// Returns whether the long press was consumed.
pub type LongClickListener = Arc<dyn Fn(&View) -> bool + Send + Sync>;
pub type FocusChangeListener = Arc<dyn Fn(&View, bool) + Send + Sync>;
/// Returns whether the motion was consumed. Shared by touch and hover.
pub type MotionListener = Arc<dyn Fn(&View, &MotionEvent) -> bool + Send + Sync>;

#[derive(Debug, Default)]
struct ViewState {
    flags: ViewFlags,
    visibility: Visibility,
}

struct ViewInner {
    id: ViewId,
    thread: UiThread,
    state: Mutex<ViewState>,
    click: ListenerSlot<ClickListener>,
    long_click: ListenerSlot<LongClickListener>,
    focus_change: ListenerSlot<FocusChangeListener>,
    touch: ListenerSlot<MotionListener>,
    hover: ListenerSlot<MotionListener>,
}

/// Shared handle to one view. Clones refer to the same view.
#[derive(Clone)]
pub struct View {
    inner: Arc<ViewInner>,
}

impl View {
    /// Create a view owned by the calling thread.
    #[must_use]
    pub fn new() -> Self {
        Self::owned_by(UiThread::current())
    }

    /// Create a view owned by `thread`.
    #[must_use]
    pub fn owned_by(thread: UiThread) -> Self {
        Self {
            inner: Arc::new(ViewInner {
                id: ViewId::next(),
                thread,
                state: Mutex::new(ViewState::default()),
                click: ListenerSlot::new(),
                long_click: ListenerSlot::new(),
                focus_change: ListenerSlot::new(),
                touch: ListenerSlot::new(),
                hover: ListenerSlot::new(),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.inner.id
    }

    /// Whether `self` and `other` are handles to the same view.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ── State ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn flags(&self) -> ViewFlags {
        lock(&self.inner.state).flags
    }

    /// Set or clear `flag`. Returns whether the state changed.
    pub fn set_flag(&self, flag: ViewFlags, on: bool) -> bool {
        let mut state = lock(&self.inner.state);
        let before = state.flags;
        state.flags.set(flag, on);
        before != state.flags
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.flags().contains(ViewFlags::ENABLED)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.set_flag(ViewFlags::ENABLED, enabled);
    }

    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.flags().contains(ViewFlags::CLICKABLE)
    }

    pub fn set_clickable(&self, clickable: bool) {
        self.set_flag(ViewFlags::CLICKABLE, clickable);
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.flags().contains(ViewFlags::PRESSED)
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.set_flag(ViewFlags::PRESSED, pressed);
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.flags().contains(ViewFlags::SELECTED)
    }

    pub fn set_selected(&self, selected: bool) {
        self.set_flag(ViewFlags::SELECTED, selected);
    }

    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.flags().contains(ViewFlags::ACTIVATED)
    }

    pub fn set_activated(&self, activated: bool) {
        self.set_flag(ViewFlags::ACTIVATED, activated);
    }

    #[must_use]
    pub fn is_focusable(&self) -> bool {
        self.flags().contains(ViewFlags::FOCUSABLE)
    }

    pub fn set_focusable(&self, focusable: bool) {
        self.set_flag(ViewFlags::FOCUSABLE, focusable);
        if !focusable {
            self.clear_focus();
        }
    }

    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.flags().contains(ViewFlags::FOCUSED)
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        lock(&self.inner.state).visibility
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        lock(&self.inner.state).visibility = visibility;
    }

    // ── Listener slots ──────────────────────────────────────────────────

    pub fn set_on_click_listener(&self, listener: Option<ClickListener>) {
        if listener.is_some() {
            self.set_flag(ViewFlags::CLICKABLE, true);
        }
        replace_slot(&self.inner.click, listener);
    }

    #[must_use]
    pub fn has_on_click_listener(&self) -> bool {
        self.inner.click.is_set()
    }

    pub fn set_on_long_click_listener(&self, listener: Option<LongClickListener>) {
        if listener.is_some() {
            self.set_flag(ViewFlags::LONG_CLICKABLE, true);
        }
        replace_slot(&self.inner.long_click, listener);
    }

    #[must_use]
    pub fn has_on_long_click_listener(&self) -> bool {
        self.inner.long_click.is_set()
    }

    pub fn set_on_focus_change_listener(&self, listener: Option<FocusChangeListener>) {
        replace_slot(&self.inner.focus_change, listener);
    }

    #[must_use]
    pub fn has_on_focus_change_listener(&self) -> bool {
        self.inner.focus_change.is_set()
    }

    pub fn set_on_touch_listener(&self, listener: Option<MotionListener>) {
        replace_slot(&self.inner.touch, listener);
    }

    #[must_use]
    pub fn has_on_touch_listener(&self) -> bool {
        self.inner.touch.is_set()
    }

    pub fn set_on_hover_listener(&self, listener: Option<MotionListener>) {
        replace_slot(&self.inner.hover, listener);
    }

    #[must_use]
    pub fn has_on_hover_listener(&self) -> bool {
        self.inner.hover.is_set()
    }

    // ── Native event simulation ─────────────────────────────────────────

    /// Deliver a click. Returns whether a listener was invoked.
    pub fn perform_click(&self) -> bool {
        #[cfg(feature = "tracing")]
        tracing::trace!(view = self.id().get(), "perform_click");
        match self.inner.click.get() {
            Some(listener) => {
                listener(self);
                true
            }
            None => false,
        }
    }

    /// Deliver a long press. Returns whether it was consumed.
    pub fn perform_long_click(&self) -> bool {
        #[cfg(feature = "tracing")]
        tracing::trace!(view = self.id().get(), "perform_long_click");
        self.inner.long_click.get().is_some_and(|listener| listener(self))
    }

    /// Take focus. Fires the focus listener if focus actually changed.
    ///
    /// Returns whether the view holds focus afterwards.
    pub fn request_focus(&self) -> bool {
        {
            let mut state = lock(&self.inner.state);
            let flags = state.flags;
            if !flags.contains(ViewFlags::FOCUSABLE | ViewFlags::ENABLED) {
                return false;
            }
            if flags.contains(ViewFlags::FOCUSED) {
                return true;
            }
            state.flags.insert(ViewFlags::FOCUSED);
        }
        self.fire_focus_change(true);
        true
    }

    /// Drop focus. Fires the focus listener if the view had focus.
    pub fn clear_focus(&self) {
        let had_focus = {
            let mut state = lock(&self.inner.state);
            let had = state.flags.contains(ViewFlags::FOCUSED);
            state.flags.remove(ViewFlags::FOCUSED);
            had
        };
        if had_focus {
            self.fire_focus_change(false);
        }
    }

    /// Route a touch motion to the touch listener. Disabled views ignore it.
    pub fn dispatch_touch_event(&self, event: &MotionEvent) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.inner
            .touch
            .get()
            .is_some_and(|listener| listener(self, event))
    }

    /// Route a hover motion to the hover listener.
    pub fn dispatch_hover_event(&self, event: &MotionEvent) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.inner
            .hover
            .get()
            .is_some_and(|listener| listener(self, event))
    }

    fn fire_focus_change(&self, has_focus: bool) {
        #[cfg(feature = "tracing")]
        tracing::trace!(view = self.id().get(), has_focus, "focus change");
        if let Some(listener) = self.inner.focus_change.get() {
            listener(self, has_focus);
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for View {
    fn ui_thread(&self) -> UiThread {
        self.inner.thread
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.inner.state);
        f.debug_struct("View")
            .field("id", &self.inner.id)
            .field("flags", &state.flags)
            .field("visibility", &state.visibility)
            .finish_non_exhaustive()
    }
}

pub(crate) fn replace_slot<L>(slot: &ListenerSlot<L>, listener: Option<L>) {
    match listener {
        Some(listener) => {
            slot.set(listener);
        }
        None => {
            slot.clear();
        }
    }
}
