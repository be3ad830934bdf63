//!
//! A wall-clock driven simulated clock that can be offset, boosted,
//! reversed and paused independently of real time.
//!

pub mod config;
pub use config::ClockConfig;

pub mod time;
pub use time::{Instant, SimulatedClock};

pub mod macros;
pub mod util;

#[doc(inline)]
pub use util::ClockError;
