//!
//! Construction parameters for a [`SimulatedClock`], settable in code or
//! through the environment.
//!
//! | variable          | meaning                                      |
//! |-------------------|----------------------------------------------|
//! | `SIMCLOCK_START`  | start instant, RFC 3339 or epoch millis      |
//! | `SIMCLOCK_BOOST`  | rate multiplier, defaults to `1`             |
//! | `SIMCLOCK_PAUSED` | `true`/`false` (`1`/`0`, `yes`/`no`)         |
//!

use log::debug;

use crate::time::{Instant, SimulatedClock, TimeSource};
use crate::util::ClockError;

pub const ENV_START: &str = "SIMCLOCK_START";
pub const ENV_BOOST: &str = "SIMCLOCK_BOOST";
pub const ENV_PAUSED: &str = "SIMCLOCK_PAUSED";

#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    pub start: Option<Instant>,
    pub boost: f64,
    pub start_paused: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start: None,
            boost: 1.0,
            start_paused: false,
        }
    }
}

impl ClockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn start(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    #[must_use]
    pub fn start_paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// Only the `SIMCLOCK_*` keys are looked at. A value that is not valid
    /// Unicode is reported as invalid for its key.
    pub fn from_env() -> Result<Self, ClockError> {
        let vars = [ENV_START, ENV_BOOST, ENV_PAUSED]
            .into_iter()
            .filter_map(|key| std::env::var_os(key).map(|value| (key, value)))
            .map(|(key, value)| match value.into_string() {
                Ok(value) => Ok((key, value)),
                Err(raw) => Err(invalid(key, &raw.to_string_lossy())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_vars(vars)
    }

    /// Reads the configuration from key/value pairs. Unknown keys are
    /// ignored, missing ones keep their defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ClockError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut cfg = Self::default();

        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_START => cfg.start = Some(value.parse()?),
                ENV_BOOST => {
                    cfg.boost = value
                        .trim()
                        .parse()
                        .map_err(|_| invalid(ENV_BOOST, value))?;
                }
                ENV_PAUSED => cfg.start_paused = parse_flag(ENV_PAUSED, value)?,
                _ => continue,
            }
            debug!("config {} = {:?}", key.as_ref(), value);
        }

        Ok(cfg)
    }

    /// Builds a clock on the system wall clock.
    pub fn build(&self) -> Result<SimulatedClock, ClockError> {
        SimulatedClock::new(self.start, self.boost, self.start_paused)
    }

    /// Builds a clock on the given time source.
    pub fn build_with<S: TimeSource>(&self, source: S) -> Result<SimulatedClock<S>, ClockError> {
        SimulatedClock::with_source(source, self.start, self.boost, self.start_paused)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ClockError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &'static str, value: &str) -> ClockError {
    ClockError::InvalidConfig {
        key,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualSource;

    #[test]
    fn defaults() {
        let cfg = ClockConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(cfg, ClockConfig::default());
        assert_eq!(cfg.boost, 1.0);
        assert!(cfg.start.is_none());
        assert!(!cfg.start_paused);
    }

    #[test]
    fn reads_all_keys() {
        let cfg = ClockConfig::from_vars([
            ("PATH", "/usr/bin"),
            (ENV_START, "2017-03-22T22:00:00Z"),
            (ENV_BOOST, " -2.5 "),
            (ENV_PAUSED, "Yes"),
        ])
        .unwrap();

        assert_eq!(
            cfg,
            ClockConfig::new()
                .start(Instant::from_millis(1_490_220_000_000))
                .boost(-2.5)
                .start_paused(true)
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ClockConfig::from_vars([(ENV_BOOST, "fast")]),
            Err(ClockError::InvalidConfig {
                key: ENV_BOOST,
                value: "fast".to_string()
            })
        );
        assert_eq!(
            ClockConfig::from_vars([(ENV_PAUSED, "maybe")]),
            Err(ClockError::InvalidConfig {
                key: ENV_PAUSED,
                value: "maybe".to_string()
            })
        );
        assert!(matches!(
            ClockConfig::from_vars([(ENV_START, "noon")]),
            Err(ClockError::InvalidTimestamp(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn from_env_ignores_foreign_non_unicode_vars() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("SIMCLOCK_TEST_FOREIGN", OsStr::from_bytes(b"\xff\xfe"));
        let cfg = ClockConfig::from_env();
        std::env::remove_var("SIMCLOCK_TEST_FOREIGN");

        assert!(cfg.is_ok(), "{:?}", cfg);
    }

    #[test]
    fn zero_boost_fails_at_build() {
        let cfg = ClockConfig::from_vars([(ENV_BOOST, "0")]).unwrap();
        assert_eq!(cfg.build().unwrap_err(), ClockError::InvalidBoost(0.0));
    }

    #[test]
    fn build_with_source() {
        let start = Instant::from_millis(1_000_000);
        let wall = ManualSource::new(Instant::from_millis(5));
        let clock = ClockConfig::new()
            .start(start)
            .boost(10.0)
            .start_paused(true)
            .build_with(wall.clone())
            .unwrap();

        wall.advance(100);
        assert!(clock.is_paused());
        assert_eq!(clock.now(), start);
        assert_eq!(clock.multiplier(), 10.0);
    }
}
