use std::thread::sleep;
use std::time::Duration;

use simclock::{time::SystemSource, ClockConfig, ClockError, Instant, SimulatedClock};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn start() -> Instant {
    "2017-03-22T22:00:00Z".parse().unwrap()
}

#[test]
fn realtime_clock_matches_wall_clock() {
    init();
    let clock = SimulatedClock::new(None, 1.0, false).unwrap();

    let difference = Instant::now().diff_millis(clock.now());
    assert!(difference.abs() < 1_000, "difference {}ms", difference);
    assert!(!clock.is_simulated());
}

#[test]
fn start_time_in_the_past() {
    init();
    let clock = SimulatedClock::new(Some(start()), 1.0, false).unwrap();

    let difference = clock.now().diff_millis(start());
    assert!(difference.abs() < 1_000, "difference {}ms", difference);
    assert!(clock.is_simulated());
    // the anchor is resampled after the offset is taken
    assert!(clock.start_time().diff_millis(start()).abs() <= 10);
}

#[test]
fn multiplier_validation() {
    init();
    assert!(!SimulatedClock::new(None, 1.0, false).unwrap().is_simulated());

    for boost in [1.0, -1.0, 0.5, 55.0, 10000.0] {
        let clock = SimulatedClock::new(Some(Instant::now()), boost, false).unwrap();
        assert_eq!(clock.multiplier(), boost);
        assert!(clock.is_simulated());
    }

    assert_eq!(
        SimulatedClock::new(Some(Instant::now()), 0.0, false).unwrap_err(),
        ClockError::InvalidBoost(0.0)
    );
}

#[test]
fn pause_clock_moving_forward() {
    init();
    let mut clock = SimulatedClock::new(Some(start()), 1.0, false).unwrap();
    clock.pause();

    sleep(Duration::from_millis(200));
    assert!(clock.now().diff_millis(start()).abs() <= 10);

    clock.resume();
    sleep(Duration::from_millis(200));
    let moved = clock.now().diff_millis(start());
    assert!((moved - 200).abs() <= 50, "moved {}ms", moved);
}

#[test]
fn pause_clock_moving_backward() {
    init();
    let mut clock = SimulatedClock::new(Some(start()), -1.0, false).unwrap();
    clock.pause();

    sleep(Duration::from_millis(200));
    assert!(clock.now().diff_millis(start()).abs() <= 10);

    clock.resume();
    sleep(Duration::from_millis(200));
    let moved = clock.now().diff_millis(start());
    assert!((moved + 200).abs() <= 50, "moved {}ms", moved);
}

#[test]
fn start_paused_clock() {
    init();
    let clock = ClockConfig::new()
        .start(start())
        .start_paused(true)
        .build()
        .unwrap();
    let frozen = clock.now();
    assert_eq!(frozen, clock.start_time());
    assert!(frozen.diff_millis(start()).abs() <= 10);

    sleep(Duration::from_millis(200));
    assert_eq!(clock.now(), frozen);
}

#[test]
fn boost_x100() {
    init();
    let test_start = Instant::now();
    let clock = SimulatedClock::with_source(SystemSource, Some(test_start), 100.0, false).unwrap();

    sleep(Duration::from_millis(1_500));
    let expected = test_start.add_millis(1_500 * 100);
    let difference = clock.now().diff_millis(expected);
    // sleep overshoots; allow ~10% of the boosted interval
    assert!(difference.abs() < 15_000, "difference {}ms", difference);
    assert!(clock.now() > test_start);
}

#[test]
fn boost_x_minus_100() {
    init();
    let test_start = Instant::now();
    let clock = SimulatedClock::new(Some(test_start), -100.0, false).unwrap();

    sleep(Duration::from_millis(1_500));
    let expected = test_start.add_millis(-1_500 * 100);
    let difference = clock.now().diff_millis(expected);
    assert!(difference.abs() < 15_000, "difference {}ms", difference);
    assert!(clock.now() < test_start);
}
