//! Shared test doubles for cache and pricing tests.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// A clock that only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Start the clock at a fixed, arbitrary instant.
    ///
    /// # Panics
    /// Never; the embedded timestamp is valid.
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("fixed test instant is valid");
        Self::new(start)
    }

    /// Move the clock forward by `delta`.
    ///
    /// # Panics
    /// Panics when `delta` does not fit a chrono `TimeDelta`; test deltas are
    /// always far below that bound.
    pub fn advance(&self, delta: Duration) {
        let delta = TimeDelta::from_std(delta).expect("test delta fits TimeDelta");
        *self.guard() += delta;
    }

    /// Current instant without going through the [`Clock`] trait.
    pub fn now(&self) -> DateTime<Utc> {
        *self.guard()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now()
    }
}
