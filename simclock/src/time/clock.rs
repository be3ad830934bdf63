use log::debug;

use super::{Instant, SystemSource, TimeSource};
use crate::util::ClockError;

///
/// A clock reporting simulated time derived from a real time source.
///
/// The simulated time is anchored at a start instant. Real time elapsed since
/// then (minus any time spent paused) is scaled by the boost factor, so a
/// boost of `60.0` runs a minute per second and `-1.0` runs backwards.
///
/// # Examples
///
/// ```
/// use simclock::time::{Instant, ManualSource, SimulatedClock};
///
/// let start: Instant = "2017-03-22T22:00:00Z".parse().unwrap();
/// let wall = ManualSource::new(Instant::EPOCH);
/// let clock = SimulatedClock::with_source(wall.clone(), Some(start), 60.0, false).unwrap();
///
/// wall.advance(1_000);
/// assert_eq!(clock.now(), start.add_millis(60_000));
/// ```
///
/// The clock takes `&mut self` to pause and resume and does no locking of its
/// own; share it between threads behind a `Mutex`.
///
#[derive(Debug, Clone)]
pub struct SimulatedClock<S = SystemSource> {
    boost: f64,
    // displacement of the unboosted time base from the source
    offset: i64,
    sim_start: Instant,
    paused: Option<Instant>,
    paused_wall_clock: i64,
    is_simulated: bool,
    source: S,
}

impl SimulatedClock {
    /// Creates a clock driven by the system wall clock.
    ///
    /// Without a `start` the clock begins at the current wall-clock time.
    /// Fails with [`ClockError::InvalidBoost`] if `boost` is zero or not finite,
    /// and with [`ClockError::StartOutOfRange`] if `start` cannot be expressed
    /// as a millisecond offset from the wall clock.
    pub fn new(
        start: Option<Instant>,
        boost: f64,
        start_paused: bool,
    ) -> Result<Self, ClockError> {
        Self::with_source(SystemSource, start, boost, start_paused)
    }
}

impl Default for SimulatedClock {
    /// A clock that tracks the wall clock exactly.
    fn default() -> Self {
        let sim_start = SystemSource.now();
        Self::anchored(SystemSource, 1.0, 0, sim_start, false, false)
    }
}

impl<S: TimeSource> SimulatedClock<S> {
    /// Creates a clock driven by an arbitrary time source.
    pub fn with_source(
        source: S,
        start: Option<Instant>,
        boost: f64,
        start_paused: bool,
    ) -> Result<Self, ClockError> {
        if boost == 0.0 || !boost.is_finite() {
            return Err(ClockError::InvalidBoost(boost));
        }

        let is_simulated = start.is_some() || boost != 1.0;

        let (offset, sim_start) = match start {
            None => (0, source.now()),
            Some(start) => {
                let offset = start
                    .as_millis()
                    .checked_sub(source.now().as_millis())
                    .ok_or(ClockError::StartOutOfRange(start))?;
                // Resample so the anchor and the offset agree on one reading.
                (offset, source.now().add_millis(offset))
            }
        };

        Ok(Self::anchored(
            source,
            boost,
            offset,
            sim_start,
            is_simulated,
            start_paused,
        ))
    }

    fn anchored(
        source: S,
        boost: f64,
        offset: i64,
        sim_start: Instant,
        is_simulated: bool,
        start_paused: bool,
    ) -> Self {
        let mut clock = Self {
            boost,
            offset,
            sim_start,
            paused: None,
            paused_wall_clock: 0,
            is_simulated,
            source,
        };

        if start_paused {
            clock.paused = Some(clock.sim_start);
            clock.paused_wall_clock = clock.source.now().as_millis();
        }

        debug!(
            "created clock at {} (boost = {}, simulated = {}, paused = {})",
            clock.sim_start, boost, is_simulated, start_paused
        );

        clock
    }

    /// The boost factor the clock was created with.
    pub fn multiplier(&self) -> f64 {
        self.boost
    }

    /// The simulated instant the clock was anchored at.
    pub fn start_time(&self) -> Instant {
        self.sim_start
    }

    /// Whether the clock was created with a start time or a boost other than 1.
    ///
    /// This stays `true` even if the simulated time happens to match the
    /// wall clock, e.g. for a clock started at the current time.
    pub fn is_simulated(&self) -> bool {
        self.is_simulated
    }

    /// Whether the simulated time is currently frozen.
    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    /// The real time source driving the clock.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the current simulated time.
    ///
    /// While paused this is the instant captured by the last pause.
    #[must_use]
    pub fn now(&self) -> Instant {
        if let Some(frozen) = self.paused {
            return frozen;
        }

        let simnow = self.source.now().add_millis(self.offset);

        // milliseconds since start at normal speed
        let delta = simnow.diff_millis(self.sim_start);
        // scaled by boost, rounded half away from zero
        let boostdelta = (delta as f64 * self.boost).round() as i64;

        self.sim_start.add_millis(boostdelta)
    }

    /// Simulated milliseconds since the start time. Negative when the clock
    /// runs backwards.
    pub fn elapsed(&self) -> i64 {
        self.now().diff_millis(self.sim_start)
    }

    /// Freezes the simulated time.
    ///
    /// Pausing an already paused clock keeps the frozen time but restarts the
    /// real-time interval the next [`resume`](Self::resume) compensates for.
    pub fn pause(&mut self) {
        let frozen = self.now();
        self.paused = Some(frozen);
        self.paused_wall_clock = self.source.now().as_millis();

        debug!("paused clock at {}", frozen);
    }

    /// Lets simulated time run again from where it was paused.
    ///
    /// Resuming a running clock does nothing.
    pub fn resume(&mut self) {
        if self.paused.is_none() {
            debug!("resume ignored: clock is not paused");
            return;
        }

        let sleeptime = self
            .source
            .now()
            .as_millis()
            .saturating_sub(self.paused_wall_clock);
        self.offset = self.offset.saturating_sub(sleeptime);

        self.paused = None;
        self.paused_wall_clock = 0;

        debug!("resumed clock after {}ms of real time", sleeptime);
    }

    /// Like [`resume`](Self::resume), but fails with [`ClockError::NotPaused`]
    /// on a running clock.
    pub fn try_resume(&mut self) -> Result<(), ClockError> {
        if !self.is_paused() {
            return Err(ClockError::NotPaused);
        }

        self.resume();
        Ok(())
    }
}
