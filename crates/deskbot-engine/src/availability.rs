// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-model cooldown tracking.
//!
//! An in-memory, best-effort rate limiter: it keeps a costlier tier from
//! being hammered repeatedly within a short span. Not distributed, not
//! persisted. Usage cooldown starts on successful invocation; a separate
//! ledger sidelines models that returned a rate-limit response.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current time, injectable so tests can drive the clock.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Tracks when each model was last used and last rate limited.
///
/// Shared by concurrent queries; both ledgers take an exclusive lock for the
/// read-check and the write so two callers cannot under-count a cooldown
/// start.
pub struct AvailabilityTracker {
    clock: Arc<dyn Clock>,
    last_used: Mutex<HashMap<String, u64>>,
    rate_limited: Mutex<HashMap<String, u64>>,
}

impl AvailabilityTracker {
    /// Creates a tracker on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a tracker with an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_used: Mutex::new(HashMap::new()),
            rate_limited: Mutex::new(HashMap::new()),
        }
    }

    /// True iff `model_id` has never been used, or its cooldown window has
    /// fully elapsed.
    pub fn is_available(&self, model_id: &str, cooldown: Duration) -> bool {
        let ledger = self
            .last_used
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match ledger.get(model_id) {
            None => true,
            Some(last) => {
                let now = self.clock.now_millis();
                now.saturating_sub(*last) > cooldown.as_millis() as u64
            }
        }
    }

    /// Records a successful use of `model_id` at the current time.
    pub fn mark_used(&self, model_id: &str) {
        let now = self.clock.now_millis();
        self.last_used
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(model_id.to_string(), now);
    }

    /// True iff `model_id` returned a rate-limit response within the window.
    pub fn is_rate_limited(&self, model_id: &str, cooldown: Duration) -> bool {
        let ledger = self
            .rate_limited
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match ledger.get(model_id) {
            None => false,
            Some(last) => {
                let now = self.clock.now_millis();
                now.saturating_sub(*last) < cooldown.as_millis() as u64
            }
        }
    }

    /// Records a rate-limit response from `model_id` at the current time.
    pub fn mark_rate_limited(&self, model_id: &str) {
        let now = self.clock.now_millis();
        self.rate_limited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(model_id.to_string(), now);
    }
}

impl Default for AvailabilityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A hand-cranked clock for cooldown tests.
#[cfg(test)]
pub(crate) struct ManualClock {
    millis: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new(start_millis: u64) -> Self {
        Self {
            millis: std::sync::atomic::AtomicU64::new(start_millis),
        }
    }

    pub(crate) fn advance(&self, delta: Duration) {
        self.millis.fetch_add(
            delta.as_millis() as u64,
            std::sync::atomic::Ordering::SeqCst,
        );
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(std::sync::atomic::Ordering::SeqCst)
    }
}
