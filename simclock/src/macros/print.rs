/// Prints a line prefixed with a clock's current simulated time.
///
/// ```
/// use simclock::{tprintln, SimulatedClock};
///
/// let clock: SimulatedClock = SimulatedClock::default();
/// tprintln!(clock, "tick {}", 1);
/// ```
#[macro_export]
macro_rules! tprintln {
    ($clock: expr) => {{
        println!("{}", $crate::macros::stamp(&$clock.now()))
    }};
    ($clock: expr, $($arg:tt)*) => {
        println!("{} {}", $crate::macros::stamp(&$clock.now()), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! tprint {
    ($clock: expr) => {{
        print!("{}", $crate::macros::stamp(&$clock.now()))
    }};
    ($clock: expr, $($arg:tt)*) => {
        print!("{} {}", $crate::macros::stamp(&$clock.now()), format!($($arg)*))
    };
}
