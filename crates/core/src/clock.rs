// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{SimResult, SimulationError};

/// Monotonic time source for the physical models.
///
/// `now()` is measured from an arbitrary origin fixed at clock creation; only
/// differences between two readings are meaningful.
pub trait Clock: std::fmt::Debug + Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall-clock backed by `std::time::Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Simulated clock that only moves when told to.
///
/// Clones share the same counter, so a test or runner can keep a handle and
/// advance time seen by a room that owns another clone.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `dt`. Saturates at `u64::MAX` nanoseconds
    /// instead of wrapping back to zero.
    pub fn advance(&self, dt: Duration) {
        let dt = u64::try_from(dt.as_nanos()).unwrap_or(u64::MAX);
        // The closure always returns Some, so the update cannot fail.
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(dt))
            });
    }

    /// Fails on negative, NaN or unrepresentable durations.
    pub fn advance_secs_f64(&self, secs: f64) -> SimResult<()> {
        let dt = Duration::try_from_secs_f64(secs).map_err(|_| {
            SimulationError::invalid(format!(
                "Invalid clock step {}. Expected a finite, non-negative number of seconds.",
                secs
            ))
        })?;
        self.advance(dt);
        Ok(())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}
