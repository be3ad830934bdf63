use std::thread::sleep;
use std::time::Duration;

use simclock::{tprintln, ClockConfig, ClockError, Instant};

const TICK: Duration = Duration::from_millis(250);

fn main() -> Result<(), ClockError> {
    env_logger::init();

    // SIMCLOCK_START=2017-03-22T22:00:00Z SIMCLOCK_BOOST=3600 sc-boost
    let cfg = ClockConfig::from_env()?;
    let mut clock = cfg.build()?;

    println!(
        "SIM: start = {}, boost = {}, simulated = {}",
        clock.start_time(),
        clock.multiplier(),
        clock.is_simulated()
    );

    for i in 0..4 {
        sleep(TICK);
        tprintln!(clock, "tick {} (wall {})", i, Instant::now());
    }

    clock.pause();
    tprintln!(clock, "paused");

    for i in 0..2 {
        sleep(TICK);
        tprintln!(clock, "paused tick {} (wall {})", i, Instant::now());
    }

    clock.resume();
    tprintln!(clock, "resumed");

    for i in 0..4 {
        sleep(TICK);
        tprintln!(clock, "tick {} (elapsed {}ms)", i, clock.elapsed());
    }

    Ok(())
}
