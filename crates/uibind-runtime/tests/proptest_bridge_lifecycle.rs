//! Property-based lifecycle tests for bridge streams.
//!
//! For any interleaving of native events, disposals, and re-subscriptions on
//! a single-slot source:
//!
//! 1. A subscriber receives exactly the events fired while it was the
//!    attached, undisposed subscriber, in order.
//! 2. Nothing is delivered after its handle is disposed.
//! 3. Disposing twice is indistinguishable from disposing once.
//! 4. After the last disposal the listener slot is empty.
//! 5. Warm subscribers always receive the current state first.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use uibind_core::{BindError, Disposable, EventSource, ListenerSlot, Observer, UiThread};
use uibind_runtime::{BridgeStream, Emitter, InitialValueStream};

// ── Helpers ─────────────────────────────────────────────────────────────

type Listener = Arc<dyn Fn(u16) + Send + Sync>;

#[derive(Clone)]
struct Dial {
    thread: UiThread,
    position: Arc<Mutex<u16>>,
    slot: Arc<ListenerSlot<Listener>>,
}

impl Dial {
    fn new() -> Self {
        Self {
            thread: UiThread::current(),
            position: Arc::new(Mutex::new(0)),
            slot: Arc::new(ListenerSlot::new()),
        }
    }

    fn turn(&self, to: u16) {
        *self.position.lock().unwrap() = to;
        if let Some(listener) = self.slot.get() {
            listener(to);
        }
    }
}

impl EventSource for Dial {
    fn ui_thread(&self) -> UiThread {
        self.thread
    }
}

fn turns(dial: &Dial) -> BridgeStream<Dial, u16> {
    BridgeStream::new(
        dial.clone(),
        |d: &Dial, emitter: Emitter<u16>| {
            d.slot.set(Arc::new(move |v| {
                emitter.emit(v);
            }));
        },
        |d: &Dial, ()| {
            d.slot.clear();
        },
    )
}

fn positions(dial: &Dial) -> InitialValueStream<Dial, u16> {
    turns(dial).with_initial(|d: &Dial| *d.position.lock().unwrap())
}

#[derive(Default)]
struct Tape {
    values: Vec<u16>,
    errors: usize,
}

struct TapeObserver(Arc<Mutex<Tape>>);

impl Observer<u16> for TapeObserver {
    fn on_next(&mut self, value: u16) {
        self.0.lock().unwrap().values.push(value);
    }
    fn on_error(&mut self, _: BindError) {
        self.0.lock().unwrap().errors += 1;
    }
}

#[derive(Debug, Clone)]
enum Op {
    Turn(u16),
    Dispose,
    Resubscribe,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<u16>().prop_map(Op::Turn),
        2 => Just(Op::Dispose),
        1 => Just(Op::Resubscribe),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// Cold streams
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cold_subscribers_see_exactly_their_window(
        ops in proptest::collection::vec(op_strategy(), 0..64)
    ) {
        let dial = Dial::new();
        let stream = turns(&dial);

        let mut tapes: Vec<(Arc<Mutex<Tape>>, Disposable, Vec<u16>)> = Vec::new();
        let tape = Arc::new(Mutex::new(Tape::default()));
        let handle = stream.subscribe(TapeObserver(Arc::clone(&tape)));
        tapes.push((tape, handle, Vec::new()));

        for op in ops {
            match op {
                Op::Turn(v) => {
                    dial.turn(v);
                    if let Some((_, handle, expected)) = tapes.last_mut() {
                        if !handle.is_disposed() {
                            expected.push(v);
                        }
                    }
                }
                Op::Dispose => {
                    if let Some((_, handle, _)) = tapes.last() {
                        handle.dispose();
                        handle.dispose();
                    }
                }
                Op::Resubscribe => {
                    if let Some((_, handle, _)) = tapes.last() {
                        handle.dispose();
                    }
                    let tape = Arc::new(Mutex::new(Tape::default()));
                    let handle = stream.subscribe(TapeObserver(Arc::clone(&tape)));
                    tapes.push((tape, handle, Vec::new()));
                }
            }
        }

        for (tape, handle, expected) in &tapes {
            let tape = tape.lock().unwrap();
            prop_assert_eq!(&tape.values, expected);
            prop_assert_eq!(tape.errors, 0);
            handle.dispose();
        }
        prop_assert!(!dial.slot.is_set());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Warm streams
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn warm_subscribers_start_with_current_state(
        before in proptest::collection::vec(any::<u16>(), 0..16),
        after in proptest::collection::vec(any::<u16>(), 0..16),
    ) {
        let dial = Dial::new();
        for v in &before {
            dial.turn(*v);
        }
        let current = *dial.position.lock().unwrap();

        let tape = Arc::new(Mutex::new(Tape::default()));
        let handle = positions(&dial).subscribe(TapeObserver(Arc::clone(&tape)));
        prop_assert_eq!(&tape.lock().unwrap().values, &vec![current]);

        for v in &after {
            dial.turn(*v);
        }
        handle.dispose();
        dial.turn(7);

        let mut expected = vec![current];
        expected.extend(after.iter().copied());
        prop_assert_eq!(&tape.lock().unwrap().values, &expected);
        prop_assert!(!dial.slot.is_set());
    }
}
