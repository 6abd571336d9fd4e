//! Injectable time sources for stamping updates.
//!
//! Update operations record the wall-clock second they were created. The
//! clock is passed in by the caller rather than read from ambient state:
//! - Production: `SystemTimeSource`
//! - Tests: `FixedTimeSource`, one value per instance
//! - Harnesses: `ManualTimeSource`, shared and advanced explicitly

use crate::operation::Timestamp;
use std::sync::atomic::{AtomicI64, Ordering};

/// A source of the current time in seconds since the Unix epoch.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new() -> Self {
        SystemTimeSource
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        chrono::Utc::now().timestamp()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimeSource(Timestamp);

impl FixedTimeSource {
    pub fn new(timestamp: Timestamp) -> Self {
        FixedTimeSource(timestamp)
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A clock that only moves when told to.
///
/// Safe to share between threads; every reader sees the latest `advance`
/// or `set`.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    current: AtomicI64,
}

impl ManualTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: AtomicI64::new(start),
        }
    }

    /// Move the clock forward by `seconds` and return the new reading.
    pub fn advance(&self, seconds: i64) -> Timestamp {
        self.current.fetch_add(seconds, Ordering::SeqCst) + seconds
    }

    pub fn set(&self, timestamp: Timestamp) {
        self.current.store(timestamp, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        self.current.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_time_source() {
        let clock = FixedTimeSource::new(10_000);
        assert_eq!(clock.now(), 10_000);
        assert_eq!(clock.now(), 10_000);
    }

    #[test]
    fn test_system_time_source_is_recent() {
        // 2021-01-01T00:00:00Z
        assert!(SystemTimeSource::new().now() > 1_609_459_200);
    }

    #[test]
    fn test_manual_time_source_advance() {
        let clock = ManualTimeSource::new(100);
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.advance(5), 105);
        assert_eq!(clock.now(), 105);

        clock.set(42);
        assert_eq!(clock.now(), 42);
    }

    #[test]
    fn test_time_source_by_reference() {
        fn read(source: impl TimeSource) -> Timestamp {
            source.now()
        }

        let clock = ManualTimeSource::new(7);
        assert_eq!(read(&clock), 7);
        clock.advance(1);
        assert_eq!(read(&clock), 8);
    }
}
