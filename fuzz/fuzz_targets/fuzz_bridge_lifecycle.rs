#![no_main]

//! Random subscribe/fire/dispose sequences against a view and a text field,
//! checked against a model of which listener is attached.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use uibind::prelude::*;

#[derive(Debug, Arbitrary)]
enum Op {
    SubscribeClicks,
    SubscribeText,
    Click,
    SetText(String),
    Dispose(u8),
    Enable(bool),
}

struct Sub {
    handle: Disposable,
    seen: Arc<AtomicUsize>,
    expected: usize,
    clicks: bool,
}

fuzz_target!(|ops: Vec<Op>| {
    let button = View::new();
    let field = TextView::new();
    let mut subs: Vec<Sub> = Vec::new();
    let mut slot_owner: Option<usize> = None;

    for op in ops.into_iter().take(256) {
        match op {
            Op::SubscribeClicks => {
                let seen = Arc::new(AtomicUsize::new(0));
                let counter = Arc::clone(&seen);
                let handle = view::clicks(&button).subscribe_fn(move |()| {
                    counter.fetch_add(1, Ordering::Relaxed);
                });
                slot_owner = Some(subs.len());
                subs.push(Sub { handle, seen, expected: 0, clicks: true });
            }
            Op::SubscribeText => {
                let seen = Arc::new(AtomicUsize::new(0));
                let counter = Arc::clone(&seen);
                let handle = text_view::text_changes(&field).subscribe_fn(move |_: String| {
                    counter.fetch_add(1, Ordering::Relaxed);
                });
                subs.push(Sub { handle, seen, expected: 1, clicks: false });
            }
            Op::Click => {
                let delivered = button.perform_click();
                assert_eq!(delivered, slot_owner.is_some());
                if let Some(owner) = slot_owner {
                    subs[owner].expected += 1;
                }
            }
            Op::SetText(text) => {
                field.set_text(text);
                for sub in subs.iter_mut().filter(|s| !s.clicks && !s.handle.is_disposed()) {
                    sub.expected += 1;
                }
            }
            Op::Dispose(index) => {
                if subs.is_empty() {
                    continue;
                }
                let index = usize::from(index) % subs.len();
                let sub = &subs[index];
                if sub.clicks && !sub.handle.is_disposed() {
                    slot_owner = None;
                }
                sub.handle.dispose();
                assert!(sub.handle.is_disposed());
            }
            Op::Enable(on) => button.set_enabled(on),
        }

        for sub in &subs {
            assert_eq!(sub.seen.load(Ordering::Relaxed), sub.expected);
        }
        assert_eq!(button.has_on_click_listener(), slot_owner.is_some());
        let watching = subs.iter().filter(|s| !s.clicks && !s.handle.is_disposed()).count();
        assert_eq!(field.text_watcher_count(), watching);
    }
});
