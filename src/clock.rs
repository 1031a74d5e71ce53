//! Wall-clock source for tracking timestamps.
//!
//! Timestamps are seconds since the Unix epoch as `f64`; elapsed values are
//! plain differences of two readings.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of `clientTime` values.
pub trait Clock: Send + Sync + 'static {
    /// Current time in seconds since the Unix epoch.
    fn now_secs(&self) -> f64;

    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> f64 {
        self.now_secs() * 1000.0
    }
}

/// System wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Manually driven clock for deterministic tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading `secs`.
    pub fn new(secs: f64) -> Self {
        Self {
            bits: AtomicU64::new(secs.to_bits()),
        }
    }

    /// Sets the current reading.
    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::SeqCst);
    }

    /// Moves the reading forward by `secs`.
    pub fn advance(&self, secs: f64) {
        self.set(self.now_secs() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(10.0);
        clock.advance(0.5);
        assert_eq!(clock.now_secs(), 10.5);
        assert_eq!(clock.now_millis(), 10_500.0);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.now_secs() > 1_500_000_000.0);
    }
}
