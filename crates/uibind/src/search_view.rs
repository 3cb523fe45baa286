#![forbid(unsafe_code)]

//! Bindings for [`SearchView`]. Streams retain the view until disposed.

use std::convert::Infallible;
use std::sync::Arc;

use uibind_runtime::{BridgeStream, Emitter, InitialValueStream, Sink};
use uibind_widgets::{QueryTextListener, SearchView};

use crate::events::SearchViewQueryTextEvent;

struct QueryTextChanges(Emitter<String>);

impl QueryTextListener for QueryTextChanges {
    fn on_query_text_change(&self, _: &SearchView, query: &str) -> bool {
        self.0.emit(query.to_owned())
    }

    fn on_query_text_submit(&self, _: &SearchView, _: &str) -> bool {
        false
    }
}

struct QueryTextEvents(Emitter<SearchViewQueryTextEvent>);

impl QueryTextEvents {
    fn emit(&self, view: &SearchView, query: &str, submitted: bool) -> bool {
        self.0.emit(SearchViewQueryTextEvent {
            view: view.as_view().id(),
            query: query.to_owned(),
            submitted,
        })
    }
}

impl QueryTextListener for QueryTextEvents {
    fn on_query_text_change(&self, view: &SearchView, query: &str) -> bool {
        self.emit(view, query, false)
    }

    fn on_query_text_submit(&self, view: &SearchView, query: &str) -> bool {
        self.emit(view, query, true)
    }
}

fn query_stream<T, L>(view: &SearchView, wrap: fn(Emitter<T>) -> L) -> BridgeStream<SearchView, T>
where
    T: Send + 'static,
    L: QueryTextListener + 'static,
{
    BridgeStream::new(
        view.clone(),
        move |v: &SearchView, emitter: Emitter<T>| {
            v.set_on_query_text_listener(Some(Arc::new(wrap(emitter))));
        },
        |v: &SearchView, ()| v.set_on_query_text_listener(None),
    )
}

/// Query text of `view` after each edit. Warm: emits the current query first.
///
/// Edits are reported as handled; submissions are left to the view.
#[must_use]
pub fn query_text_changes(view: &SearchView) -> InitialValueStream<SearchView, String> {
    query_stream(view, QueryTextChanges).with_initial(SearchView::query)
}

/// Edits and submissions of `view`. Warm: emits the current query, not
/// submitted, first.
#[must_use]
pub fn query_text_change_events(
    view: &SearchView,
) -> InitialValueStream<SearchView, SearchViewQueryTextEvent> {
    query_stream(view, QueryTextEvents).with_initial(|v: &SearchView| SearchViewQueryTextEvent {
        view: v.as_view().id(),
        query: v.query(),
        submitted: false,
    })
}

/// Replaces the query of `view`, submitting it when `submit` is set.
#[must_use]
pub fn query(view: &SearchView, submit: bool) -> Sink<String, Infallible> {
    Sink::bind(view.clone(), move |v: &SearchView, text: String| {
        v.set_query(text, submit);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    #[test]
    fn query_text_changes_ignore_submit() {
        let view = SearchView::new();
        view.set_query("r", false);
        let (seen, observer) = record();
        let _handle = query_text_changes(&view).subscribe(observer);
        view.set_query("ru", true);
        assert_eq!(*seen.lock().unwrap(), vec!["r".to_string(), "ru".to_string()]);
        assert!(!view.submit_query());
    }

    #[test]
    fn query_events_flag_submission() {
        let view = SearchView::new();
        let (seen, observer) = record();
        let _handle = query_text_change_events(&view).subscribe(observer);
        query(&view, true).set("rust".to_string());
        let flags: Vec<(String, bool)> = seen
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.query.clone(), e.submitted))
            .collect();
        assert_eq!(
            flags,
            vec![
                (String::new(), false),
                ("rust".to_string(), false),
                ("rust".to_string(), true),
            ]
        );
    }
}
