// src/progress.rs
/// Progress reporting for the fetch loop.
/// Frontends (CLI today) implement this to surface attempts to a human.
pub trait Progress {
    /// Called once with the maximum number of attempts.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One attempt came back without a value.
    fn attempt_failed(&mut self, _attempt: u32, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Forwards everything to the log.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    failed: u32,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        logd!("Fetch: up to {} attempt(s)", total);
    }
    fn log(&mut self, msg: &str) {
        logf!("{}", msg);
    }
    fn attempt_failed(&mut self, attempt: u32, reason: &str) {
        self.failed += 1;
        logw!("Fetch: attempt {}/{} failed: {}", attempt, self.total, reason);
    }
    fn finish(&mut self) {
        logd!("Fetch: done ({} failed attempt(s))", self.failed);
    }
}
