//! Progress sink that records updates.

use std::sync::Mutex;

use crate::progress::ProgressSink;

/// Records every progress update for test assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    total: Mutex<Option<u64>>,
    positions: Mutex<Vec<u64>>,
    finished: Mutex<Option<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total passed to `start`, if it was called.
    pub fn total(&self) -> Option<u64> {
        *self.total.lock().unwrap()
    }

    /// Every position set so far, in order.
    pub fn positions(&self) -> Vec<u64> {
        self.positions.lock().unwrap().clone()
    }

    pub fn last_position(&self) -> Option<u64> {
        self.positions.lock().unwrap().last().copied()
    }

    /// Message passed to `finish`, if it was called.
    pub fn finished(&self) -> Option<String> {
        self.finished.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn start(&self, total_secs: u64) {
        *self.total.lock().unwrap() = Some(total_secs);
    }

    fn set_position(&self, secs: u64) {
        self.positions.lock().unwrap().push(secs);
    }

    fn finish(&self, message: &str) {
        *self.finished.lock().unwrap() = Some(message.to_string());
    }
}
