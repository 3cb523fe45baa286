//! Running code off the UI thread.

use std::thread;

/// Run `f` on a new thread and return its result.
///
/// # Panics
///
/// Re-raises a panic from `f` on the calling thread.
pub fn on_other_thread<R, F>(f: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    thread::scope(|scope| match scope.spawn(f).join() {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    })
}
