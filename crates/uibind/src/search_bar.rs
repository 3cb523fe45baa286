#![forbid(unsafe_code)]

//! Bindings for [`SearchBar`]. Streams retain the bar until disposed.

use std::convert::Infallible;
use std::sync::Arc;

use uibind_runtime::{BridgeStream, Emitter, Sink};
use uibind_widgets::{SearchBar, SearchBarListener};

use crate::events::{SearchBarSearchQueryEvent, SearchQueryKind};

struct QueryChanges(Emitter<String>);

impl SearchBarListener for QueryChanges {
    fn on_search_query_change(&self, _: &SearchBar, query: &str) {
        self.0.emit(query.to_owned());
    }

    fn on_search_query_submit(&self, _: &SearchBar, _: &str) {}

    fn on_keyboard_dismiss(&self, _: &SearchBar, _: &str) {}
}

struct QueryEvents(Emitter<SearchBarSearchQueryEvent>);

impl QueryEvents {
    fn emit(&self, bar: &SearchBar, query: &str, kind: SearchQueryKind) {
        self.0.emit(SearchBarSearchQueryEvent {
            view: bar.as_view().id(),
            query: query.to_owned(),
            kind,
        });
    }
}

impl SearchBarListener for QueryEvents {
    fn on_search_query_change(&self, bar: &SearchBar, query: &str) {
        self.emit(bar, query, SearchQueryKind::Changed);
    }

    fn on_search_query_submit(&self, bar: &SearchBar, query: &str) {
        self.emit(bar, query, SearchQueryKind::Submitted);
    }

    fn on_keyboard_dismiss(&self, bar: &SearchBar, query: &str) {
        self.emit(bar, query, SearchQueryKind::KeyboardDismissed);
    }
}

fn bar_stream<T, L>(bar: &SearchBar, wrap: fn(Emitter<T>) -> L) -> BridgeStream<SearchBar, T>
where
    T: Send + 'static,
    L: SearchBarListener + 'static,
{
    BridgeStream::new(
        bar.clone(),
        move |b: &SearchBar, emitter: Emitter<T>| {
            b.set_search_bar_listener(Some(Arc::new(wrap(emitter))));
        },
        |b: &SearchBar, ()| b.set_search_bar_listener(None),
    )
}

/// Query text of `bar` after each edit. Cold.
#[must_use]
pub fn search_query_changes(bar: &SearchBar) -> BridgeStream<SearchBar, String> {
    bar_stream(bar, QueryChanges)
}

/// Edits, submissions and keyboard dismissals of `bar`. Cold.
#[must_use]
pub fn search_query_change_events(
    bar: &SearchBar,
) -> BridgeStream<SearchBar, SearchBarSearchQueryEvent> {
    bar_stream(bar, QueryEvents)
}

/// Replaces the query of `bar`.
#[must_use]
pub fn search_query(bar: &SearchBar) -> Sink<String, Infallible> {
    Sink::bind(bar.clone(), |b: &SearchBar, query: String| {
        b.set_search_query(query);
        Ok(())
    })
}
