// src/fetcher/retry.rs
//
// Synchronous retry: N attempts, a blocking sleep between them.

use std::{thread, time::Duration};

use rand::Rng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backoff {
    None,
    Fixed(Duration),
    /// Uniform in `[min, max]`, re-rolled per gap.
    Jitter { min: Duration, max: Duration },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Single attempt, no sleep.
    pub fn once() -> Self {
        Self { max_attempts: 1, backoff: Backoff::None }
    }

    /// Never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait before the next attempt.
    pub fn delay(&self) -> Duration {
        match self.backoff {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(d) => d,
            Backoff::Jitter { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                let ms = rand::thread_rng().gen_range(lo.as_millis() as u64..=hi.as_millis() as u64);
                Duration::from_millis(ms)
            }
        }
    }

    /// Run `op(attempt)` until it succeeds or attempts run out.
    /// `on_fail` sees every failed attempt; the last error is returned.
    pub fn run<T, E>(
        &self,
        mut op: impl FnMut(u32) -> Result<T, E>,
        mut on_fail: impl FnMut(u32, &E),
    ) -> Result<T, E> {
        let total = self.attempts();
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    on_fail(attempt, &e);
                    if attempt >= total {
                        return Err(e);
                    }
                }
            }
            let d = self.delay();
            if !d.is_zero() {
                thread::sleep(d);
            }
            attempt += 1;
        }
    }
}
