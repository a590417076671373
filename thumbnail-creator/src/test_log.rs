//! Captures log records per test thread so tests can assert on them.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

struct CapturingLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("tracing::span") {
            return;
        }
        self.records.lock().unwrap().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

/// Install the capturing logger. Safe to call from every test.
pub(crate) fn capture() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Messages logged at `level` by the current thread.
pub(crate) fn logged(level: Level) -> Vec<String> {
    let current = thread::current().id();
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(thread, lvl, _)| *thread == current && *lvl == level)
        .map(|(_, _, message)| message.clone())
        .collect()
}

pub(crate) fn assert_logged(level: Level, needle: &str) {
    let messages = logged(level);
    assert!(
        messages.iter().any(|message| message.contains(needle)),
        "no {level} record containing {needle:?} in {messages:?}"
    );
}
