/// Errors raised while constructing or driving a [`SimulatedClock`](crate::SimulatedClock).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClockError {
    /// The rate multiplier would freeze time or make it undefined.
    #[error("invalid boost {0}: must be finite and non-zero")]
    InvalidBoost(f64),

    /// The start lies too far from the real time for the offset to fit.
    #[error("start {0} is out of range of the time source")]
    StartOutOfRange(crate::time::Instant),

    /// `try_resume` was called on a running clock.
    #[error("clock is not paused")]
    NotPaused,

    #[error("invalid timestamp {0:?}: expected RFC 3339 or epoch milliseconds")]
    InvalidTimestamp(String),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
