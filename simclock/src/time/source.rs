//! Source of real time.
//!
//! By default the wall clock is used. [`ManualSource`] hands out a
//! controllable time base so clock behaviour can be checked without sleeping.

use std::rc::Rc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::Instant;

/// Supplies the current real-world time to a clock.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSource;

impl TimeSource for SystemSource {
    fn now(&self) -> Instant {
        let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map(|m| -m)
                .unwrap_or(i64::MIN),
        };
        Instant::from_millis(millis)
    }
}

///
/// A hand-driven time source.
///
/// Clones share the same underlying time, so a test can keep one handle
/// while a clock owns another.
///
#[derive(Debug, Clone, Default)]
pub struct ManualSource {
    millis: Arc<AtomicI64>,
}

impl ManualSource {
    pub fn new(start: Instant) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.as_millis())),
        }
    }

    pub fn set(&self, time: Instant) {
        self.millis.store(time.as_millis(), Ordering::SeqCst);
    }

    /// Moves the source by `millis`, which may be negative.
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn advance_by(&self, duration: Duration) {
        self.advance(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX));
    }
}

impl TimeSource for ManualSource {
    fn now(&self) -> Instant {
        Instant::from_millis(self.millis.load(Ordering::SeqCst))
    }
}
