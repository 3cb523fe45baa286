#![forbid(unsafe_code)]

//! Behavior with the thread-affinity check switched off. Kept in its own test
//! binary because the switch is process-wide.

use std::sync::{Mutex, PoisonError};

use uibind::prelude::*;
use uibind_core::config::{self, BindConfig, ThreadCheck};
use uibind_harness::{RecordingObserver, on_other_thread};

static SERIAL: Mutex<()> = Mutex::new(());

fn with_check_disabled(f: impl FnOnce()) {
    let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    let _guard =
        config::install_scoped(BindConfig::default().with_thread_check(ThreadCheck::Disabled));
    f();
}

#[test]
fn disabled_check_lets_any_thread_subscribe() {
    with_check_disabled(|| {
        let button = View::new();
        let recorder = RecordingObserver::<()>::new();
        let handle = on_other_thread(|| view::clicks(&button).subscribe(recorder.clone()));
        recorder.assert_no_more_events();
        assert!(!handle.is_disposed());
        assert!(button.has_on_click_listener());

        button.perform_click();
        recorder.take_next();

        // Disposal from a third thread detaches as usual.
        on_other_thread(|| handle.dispose());
        assert!(!button.has_on_click_listener());
    });
}

#[test]
fn disabled_check_still_delivers_initial_value() {
    with_check_disabled(|| {
        let list = AdapterView::with_count(4);
        list.set_selection(2).expect("in range");
        let recorder = RecordingObserver::new();
        let _handle =
            on_other_thread(|| adapter_view::item_selections(&list).subscribe(recorder.clone()));
        assert_eq!(recorder.take_next(), 2);
    });
}
