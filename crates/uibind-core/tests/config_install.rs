#![forbid(unsafe_code)]

//! Process-wide configuration swap. Kept in its own test binary because it
//! mutates global state that the guard reads.

use uibind_core::config::{self, BindConfig, ThreadCheck};
use uibind_core::{BindError, Observer, UiThread, check_ui_thread};

struct Count {
    errors: usize,
}

impl Observer<()> for Count {
    fn on_next(&mut self, _: ()) {}
    fn on_error(&mut self, _: BindError) {
        self.errors += 1;
    }
}

fn check_from_other_thread(owner: UiThread) -> (bool, usize) {
    std::thread::spawn(move || {
        let mut count = Count { errors: 0 };
        let passed = check_ui_thread(owner, &mut count);
        (passed, count.errors)
    })
    .join()
    .expect("guard thread panicked")
}

#[test]
fn scoped_override_disables_then_restores_thread_check() {
    let owner = UiThread::current();
    let baseline = config::current();

    {
        let _guard =
            config::install_scoped(BindConfig::default().with_thread_check(ThreadCheck::Disabled));
        assert_eq!(config::current().thread_check, ThreadCheck::Disabled);
        assert_eq!(check_from_other_thread(owner), (true, 0));
    }

    assert_eq!(*config::current(), *baseline);

    let previous = config::install(BindConfig::default());
    assert_eq!(*previous, *baseline);
    assert_eq!(check_from_other_thread(owner), (false, 1));
}
