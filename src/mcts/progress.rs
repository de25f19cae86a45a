//! Progress reporting for timed runs.

use log::info;

/// Receives the remaining time of a timed run, once per second.
pub trait ProgressSink: Send {
    fn remaining(&self, seconds: u64);
}

/// Logs `Rest seconds: N` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn remaining(&self, seconds: u64) {
        info!("Rest seconds: {}", seconds);
    }
}

/// Discards progress reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn remaining(&self, _seconds: u64) {}
}
