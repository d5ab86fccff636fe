use super::Debouncer;
use std::time::{Duration, Instant};

const QUIET: Duration = Duration::from_millis(300);

#[test]
fn test_fires_only_after_quiet_period() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    debouncer.schedule("siem", start);

    assert_eq!(debouncer.fire(start + Duration::from_millis(299)), None);
    assert_eq!(debouncer.fire(start + QUIET), Some("siem"));
    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.fire(start + QUIET * 2), None);
}

#[test]
fn test_burst_coalesces_to_last_value() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    let mut fired = Vec::new();
    for (i, value) in ["s", "si", "sie", "siem"].into_iter().enumerate() {
        let now = start + Duration::from_millis(100 * i as u64);
        if let Some(v) = debouncer.fire(now) {
            fired.push(v);
        }
        debouncer.schedule(value, now);
    }
    let last_input = start + Duration::from_millis(300);
    if let Some(v) = debouncer.fire(last_input + QUIET) {
        fired.push(v);
    }

    assert_eq!(fired, vec!["siem"]);
}

#[test]
fn test_schedule_returns_superseded_value() {
    let now = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    assert_eq!(debouncer.schedule(1, now), None);
    assert_eq!(debouncer.schedule(2, now), Some(1));
    assert_eq!(debouncer.cancel(), Some(2));
    assert_eq!(debouncer.cancel(), None);
}

#[test]
fn test_rescheduling_restarts_the_quiet_period() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    debouncer.schedule('a', start);
    debouncer.schedule('b', start + Duration::from_millis(200));

    assert_eq!(debouncer.fire(start + QUIET), None);
    assert_eq!(
        debouncer.time_until_due(start + QUIET),
        Some(Duration::from_millis(200))
    );
    assert_eq!(debouncer.fire(start + Duration::from_millis(500)), Some('b'));
}

#[test]
fn test_time_until_due_saturates() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);
    assert_eq!(debouncer.time_until_due(start), None);
    debouncer.schedule((), start);
    assert_eq!(debouncer.time_until_due(start + QUIET * 3), Some(Duration::ZERO));
}
