//! Fixed-window send quota
//!
//! Mirrors the provider's daily quota: a counter that resets once the
//! window has fully elapsed. Bursts across a window boundary are allowed.
//! State is process-local, so every running instance gets its own quota.

use super::clock::Clock;
use super::provider::EmailProviderError;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// Snapshot of the current quota window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub window_start: DateTime<Utc>,
    pub request_count: u64,
}

pub struct FixedWindowLimiter {
    max_requests: u64,
    window_secs: u64,
    window: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<RateWindow>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u64, window_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let window = i64::try_from(window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        let state = Mutex::new(RateWindow {
            window_start: clock.now(),
            request_count: 0,
        });

        Self {
            max_requests,
            window_secs,
            window,
            clock,
            state,
        }
    }

    /// Roll the window if it has elapsed, then reject when the quota is used up.
    ///
    /// Does not count the attempt; call [`record_attempt`](Self::record_attempt)
    /// once the network call has resolved.
    pub fn check(&self) -> Result<(), EmailProviderError> {
        let now = self.clock.now();
        let mut state = self.lock();

        if now - state.window_start > self.window {
            state.window_start = now;
            state.request_count = 0;
        }

        if state.request_count >= self.max_requests {
            return Err(EmailProviderError::RateLimited {
                max_requests: self.max_requests,
                window_secs: self.window_secs,
            });
        }

        Ok(())
    }

    pub fn record_attempt(&self) {
        let mut state = self.lock();
        state.request_count = state.request_count.saturating_add(1);
    }

    pub fn snapshot(&self) -> RateWindow {
        *self.lock()
    }

    /// Start a fresh window at the current time
    pub fn reset(&self) {
        let now = self.clock.now();
        *self.lock() = RateWindow {
            window_start: now,
            request_count: 0,
        };
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RateWindow> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
