//! Errors raised by widget setters.

use std::fmt;

/// A widget mutation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// Adapter position outside `0..count`.
    PositionOutOfRange {
        /// Requested position.
        position: i32,
        /// Number of items in the adapter.
        count: usize,
    },
    /// Pager page outside `0..count`.
    PageOutOfRange {
        /// Requested page.
        page: usize,
        /// Number of pages.
        count: usize,
    },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfRange { position, count } => {
                write!(f, "position {position} out of range for {count} items")
            }
            Self::PageOutOfRange { page, count } => {
                write!(f, "page {page} out of range for {count} pages")
            }
        }
    }
}

impl std::error::Error for WidgetError {}
