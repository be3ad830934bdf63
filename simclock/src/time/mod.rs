//!
//! Time primitives with millisecond resolution, plus the clock built on them.
//!

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::{Debug, Display, Formatter};
use std::ops::*;
use std::str::FromStr;
use std::time::Duration;

use crate::util::ClockError;

mod clock;
pub use clock::*;

mod source;
pub use source::*;

///
/// A specific point in time, stored as milliseconds since the Unix epoch (UTC).
///
/// All arithmetic on an [`Instant`] is pure: operations return a new value
/// and never touch the receiver.
///
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(i64);

impl Instant {
    /// Returns the current wall-clock time.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use simclock::time::Instant;
    ///
    /// let now = Instant::now();
    /// ```
    #[must_use]
    pub fn now() -> Self {
        SystemSource.now()
    }

    /// Creates an instant from milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Instant(millis)
    }

    /// Milliseconds since the Unix epoch. Negative before 1970.
    #[inline]
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns `self - other` in milliseconds, negative if `other` is later.
    ///
    /// # Examples
    ///
    /// ```
    /// use simclock::time::Instant;
    ///
    /// let a = Instant::from_millis(1_500);
    /// let b = Instant::from_millis(2_000);
    /// assert_eq!(a.diff_millis(b), -500);
    /// assert_eq!(b.diff_millis(a), 500);
    /// ```
    #[inline]
    #[must_use]
    pub const fn diff_millis(&self, other: Instant) -> i64 {
        self.0.saturating_sub(other.0)
    }

    /// Returns the instant `millis` milliseconds after `self`, saturating at
    /// the bounds of the representation.
    #[inline]
    #[must_use = "This returns the result of the operation without modifying the original"]
    pub const fn add_millis(self, millis: i64) -> Instant {
        Instant(self.0.saturating_add(millis))
    }

    /// Returns `Some(t)` where `t` is `self + millis`, or `None` on overflow.
    #[inline]
    #[must_use = "This returns the result of the operation without modifying the original"]
    pub const fn checked_add_millis(self, millis: i64) -> Option<Instant> {
        match self.0.checked_add(millis) {
            Some(v) => Some(Instant(v)),
            None => None,
        }
    }

    /// Returns the amount of time elapsed from another instant to this one,
    /// or None if that instant is later than this one.
    #[must_use]
    pub fn checked_duration_since(&self, earlier: Instant) -> Option<Duration> {
        let diff = self.0.checked_sub(earlier.0)?;
        u64::try_from(diff).ok().map(Duration::from_millis)
    }

    /// Returns the amount of time elapsed from another instant to this one,
    /// or zero duration if that instant is later than this one.
    #[must_use]
    pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
        self.checked_duration_since(earlier).unwrap_or_default()
    }

    /// Returns `Some(t)` where `t` is the time `self + duration` if `t` can be
    /// represented, `None` otherwise. Sub-millisecond parts are truncated.
    #[must_use]
    pub fn checked_add(&self, duration: Duration) -> Option<Instant> {
        let millis = i64::try_from(duration.as_millis()).ok()?;
        self.checked_add_millis(millis)
    }

    /// Returns `Some(t)` where `t` is the time `self - duration` if `t` can be
    /// represented, `None` otherwise. Sub-millisecond parts are truncated.
    #[must_use]
    pub fn checked_sub(&self, duration: Duration) -> Option<Instant> {
        let millis = i64::try_from(duration.as_millis()).ok()?;
        self.0.checked_sub(millis).map(Instant)
    }

    /// The instant as a UTC date, if it lies within chrono's supported range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

// # Custom Additions
impl Instant {
    /// 1970-01-01T00:00:00Z.
    pub const EPOCH: Instant = Instant(0);
    /// The smallest instance of an [Instant].
    pub const MIN: Instant = Instant(i64::MIN);
    /// The greatest instance of an [Instant].
    pub const MAX: Instant = Instant(i64::MAX);
}

// OPS

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs)
            .expect("Overflow when adding Duration to Instant")
    }
}

impl AddAssign<Duration> for Instant {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(rhs)
            .expect("Overflow when substracting Duration from Instant")
    }
}

impl SubAssign<Duration> for Instant {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs
    }
}

/// Signed difference in milliseconds.
impl Sub<Instant> for Instant {
    type Output = i64;

    fn sub(self, rhs: Instant) -> Self::Output {
        self.diff_millis(rhs)
    }
}

// FMT

impl Debug for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instant({})", self)
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(date) => f.write_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

// FROM

impl From<DateTime<Utc>> for Instant {
    fn from(value: DateTime<Utc>) -> Self {
        Instant(value.timestamp_millis())
    }
}

/// Accepts an RFC 3339 timestamp or an integer of epoch milliseconds.
impl FromStr for Instant {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(millis) = s.parse::<i64>() {
            return Ok(Instant(millis));
        }

        DateTime::parse_from_rfc3339(s)
            .map(|date| Instant::from(date.with_timezone(&Utc)))
            .map_err(|_| ClockError::InvalidTimestamp(s.to_string()))
    }
}
