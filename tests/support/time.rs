// tests/support/time.rs
use chrono::{DateTime, Duration, Utc};
use inventory_core::application::ports::time::Clock;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/time.rs")
        .with_timezone(&Utc)
});

/// Deterministic timestamp shared by the integration tests.
pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// Starts at [`fixed_now`] and moves one second forward on every read.
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            next: Mutex::new(fixed_now()),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}
