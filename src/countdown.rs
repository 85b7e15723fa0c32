//! Countdown to the launch instant.
//!
//! [`tick`] is the pure computation. [`Countdown`] owns the state that the page
//! used to keep in globals (target plus "already live" flag) and turns repeated
//! `Ended` results into a single [`CountdownEvent::Live`]. [`Ticker`] is a lazy
//! clock so the whole thing can be driven without waiting on real time.

use crate::config::LAUNCH_DATE_KEY;
use crate::storage::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info, warn};
use std::fmt;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

/// Absolute launch instant in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaunchTarget(i64);

impl LaunchTarget {
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// ISO-8601 in UTC with millisecond precision, e.g. `2026-02-01T00:00:00.000Z`.
    pub fn to_iso(self) -> Option<String> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn from_iso(input: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(input.trim()).map(|dt| Self(dt.timestamp_millis()))
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso() {
            Some(iso) => f.write_str(&iso),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Remaining time split into whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Breakdown {
    /// Decompose a positive distance in milliseconds. Sub-second remainder is dropped.
    pub fn from_millis(distance: i64) -> Self {
        let distance = distance.max(0);
        Self {
            days: (distance / MS_PER_DAY) as u64,
            hours: ((distance % MS_PER_DAY) / MS_PER_HOUR) as u32,
            minutes: ((distance % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            seconds: ((distance % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400
            + u64::from(self.hours) * 3_600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }

    /// Fields as text, each zero-padded to at least two digits.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Remaining(Breakdown),
    Ended,
}

/// Remaining time from `now_ms` to `target`. A target in the past is simply `Ended`.
pub fn tick(target: LaunchTarget, now_ms: i64) -> Tick {
    let distance = target.as_millis().saturating_sub(now_ms);
    if distance <= 0 {
        Tick::Ended
    } else {
        Tick::Remaining(Breakdown::from_millis(distance))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Update(Breakdown),
    /// Emitted once, the first time the target is reached.
    Live,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    target: LaunchTarget,
    live: bool,
}

impl Countdown {
    pub fn new(target: LaunchTarget) -> Self {
        Self {
            target,
            live: false,
        }
    }

    pub fn target(&self) -> LaunchTarget {
        self.target
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Returns `None` once the countdown has gone live; callers stop ticking then.
    pub fn advance(&mut self, now_ms: i64) -> Option<CountdownEvent> {
        if self.live {
            return None;
        }
        match tick(self.target, now_ms) {
            Tick::Remaining(breakdown) => Some(CountdownEvent::Update(breakdown)),
            Tick::Ended => {
                self.live = true;
                info!("Countdown reached launch target {}", self.target);
                Some(CountdownEvent::Live)
            }
        }
    }

    /// Feed instants from `clock` until the countdown goes live.
    ///
    /// The returned iterator ends right after [`CountdownEvent::Live`], so an
    /// infinite clock such as [`Ticker`] is safe to pass in.
    pub fn drive<I>(self, clock: I) -> impl Iterator<Item = CountdownEvent>
    where
        I: IntoIterator<Item = i64>,
    {
        clock
            .into_iter()
            .scan(self, |countdown, now_ms| countdown.advance(now_ms))
    }
}

/// Infinite sequence of tick instants: `start`, `start + period`, ...
#[derive(Debug, Clone)]
pub struct Ticker {
    next_ms: i64,
    period_ms: i64,
}

impl Ticker {
    pub fn starting_at(start_ms: i64, period_ms: u32) -> Self {
        Self {
            next_ms: start_ms,
            period_ms: i64::from(period_ms.max(1)),
        }
    }
}

impl Iterator for Ticker {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next_ms;
        self.next_ms = self.next_ms.saturating_add(self.period_ms);
        Some(current)
    }
}

/// How the launch instant is chosen for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPolicy {
    Fixed(LaunchTarget),
    /// First visit picks `now + offset_days` and stores it; later visits reuse it.
    RollingPersisted { offset_days: i64 },
}

/// Resolve the launch instant for this visit.
///
/// With the rolling policy a stored value is returned verbatim, even if it is
/// already in the past. A missing or unparseable value is replaced by a fresh
/// one, as on a first visit.
pub fn resolve_launch_target(
    policy: LaunchPolicy,
    store: &impl KeyValueStore,
    now_ms: i64,
) -> LaunchTarget {
    let offset_days = match policy {
        LaunchPolicy::Fixed(target) => return target,
        LaunchPolicy::RollingPersisted { offset_days } => offset_days,
    };

    if let Some(stored) = store.get(LAUNCH_DATE_KEY) {
        match LaunchTarget::from_iso(&stored) {
            Ok(target) => {
                debug!("Using stored launch date {}", stored);
                return target;
            }
            Err(e) => warn!("Ignoring corrupt launch date '{}': {}", stored, e),
        }
    }

    let target =
        LaunchTarget::from_millis(now_ms.saturating_add(offset_days.saturating_mul(MS_PER_DAY)));
    match target.to_iso() {
        Some(iso) => {
            if let Err(e) = store.set(LAUNCH_DATE_KEY, &iso) {
                warn!("Could not persist launch date: {}", e);
            } else {
                info!("Launch date set to {}", iso);
            }
        }
        None => warn!("Launch target {}ms is out of range, not persisted", target.as_millis()),
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FIXED_LAUNCH_MS, FIXED_LAUNCH_POLICY};
    use crate::storage::MemoryStore;

    const TARGET: LaunchTarget = LaunchTarget::from_millis(FIXED_LAUNCH_MS);

    #[test]
    fn tick_splits_distance_into_units() {
        let distance = MS_PER_DAY + 2 * MS_PER_HOUR + 3 * MS_PER_MINUTE + 4 * MS_PER_SECOND + 500;
        let expected = Breakdown {
            days: 1,
            hours: 2,
            minutes: 3,
            seconds: 4,
        };
        assert_eq!(tick(TARGET, FIXED_LAUNCH_MS - distance), Tick::Remaining(expected));
        assert_eq!(expected.padded(), ["01", "02", "03", "04"]);
    }

    #[test]
    fn sub_second_remainder_still_counts_as_running() {
        assert_eq!(
            tick(TARGET, FIXED_LAUNCH_MS - 1),
            Tick::Remaining(Breakdown::default())
        );
    }

    #[test]
    fn large_day_counts_are_not_truncated() {
        let b = Breakdown::from_millis(123 * MS_PER_DAY + 9 * MS_PER_SECOND);
        assert_eq!(b.padded(), ["123", "00", "00", "09"]);
    }

    #[test]
    fn remaining_time_never_increases_as_now_advances() {
        let start = FIXED_LAUNCH_MS - 3 * MS_PER_DAY;
        let mut previous = u64::MAX;
        let mut now = start;
        while now < FIXED_LAUNCH_MS {
            match tick(TARGET, now) {
                Tick::Remaining(b) => {
                    assert!(b.hours < 24 && b.minutes < 60 && b.seconds < 60);
                    assert!(b.total_seconds() <= previous);
                    previous = b.total_seconds();
                }
                Tick::Ended => panic!("ended early at {now}"),
            }
            now += 7_777;
        }
    }

    #[test]
    fn at_or_after_target_is_always_ended() {
        for offset in [0, 1, MS_PER_SECOND, MS_PER_DAY, 400 * MS_PER_DAY] {
            assert_eq!(tick(TARGET, FIXED_LAUNCH_MS + offset), Tick::Ended);
        }
    }

    #[test]
    fn countdown_goes_live_exactly_once() {
        let mut countdown = Countdown::new(TARGET);
        assert!(matches!(
            countdown.advance(FIXED_LAUNCH_MS - 5_000),
            Some(CountdownEvent::Update(_))
        ));
        assert_eq!(countdown.advance(FIXED_LAUNCH_MS), Some(CountdownEvent::Live));
        assert!(countdown.is_live());
        assert_eq!(countdown.advance(FIXED_LAUNCH_MS + 1_000), None);
        assert_eq!(countdown.advance(FIXED_LAUNCH_MS + MS_PER_DAY), None);
        // a clock jumping backwards does not revive it
        assert_eq!(countdown.advance(FIXED_LAUNCH_MS - MS_PER_DAY), None);
    }

    #[test]
    fn driving_with_a_ticker_stops_after_live() {
        let start = FIXED_LAUNCH_MS - 3_500;
        let events: Vec<_> = Countdown::new(TARGET)
            .drive(Ticker::starting_at(start, 1_000))
            .collect();

        let seconds: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                CountdownEvent::Update(b) => Some(b.seconds),
                CountdownEvent::Live => None,
            })
            .collect();
        assert_eq!(seconds, vec![3, 2, 1, 0]);
        assert_eq!(events.last(), Some(&CountdownEvent::Live));
    }

    #[test]
    fn iso_round_trip_is_millisecond_exact() {
        let target = LaunchTarget::from_millis(FIXED_LAUNCH_MS + 123);
        let iso = target.to_iso().unwrap();
        assert_eq!(iso, "2026-02-01T00:00:00.123Z");
        assert_eq!(LaunchTarget::from_iso(&iso).unwrap(), target);
    }

    #[test]
    fn fixed_policy_ignores_storage() {
        let store = MemoryStore::new();
        let target = resolve_launch_target(FIXED_LAUNCH_POLICY, &store, 0);
        assert_eq!(target, TARGET);
        assert!(store.is_empty());
    }

    #[test]
    fn rolling_policy_persists_first_choice() {
        let store = MemoryStore::new();
        let policy = LaunchPolicy::RollingPersisted { offset_days: 15 };
        let first_visit = 1_760_000_000_457;

        let first = resolve_launch_target(policy, &store, first_visit);
        assert_eq!(first.as_millis(), first_visit + 15 * MS_PER_DAY);

        let reload = resolve_launch_target(policy, &store, first_visit + 3 * MS_PER_DAY);
        assert_eq!(reload, first);
    }

    #[test]
    fn rolling_policy_keeps_a_stored_date_in_the_past() {
        let store = MemoryStore::new();
        store.set(LAUNCH_DATE_KEY, "2020-01-01T00:00:00.000Z").unwrap();
        let policy = LaunchPolicy::RollingPersisted { offset_days: 15 };

        let target = resolve_launch_target(policy, &store, FIXED_LAUNCH_MS);
        assert_eq!(tick(target, FIXED_LAUNCH_MS), Tick::Ended);
        assert_eq!(
            store.get(LAUNCH_DATE_KEY).as_deref(),
            Some("2020-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn rolling_policy_replaces_corrupt_value() {
        let store = MemoryStore::new();
        store.set(LAUNCH_DATE_KEY, "not a date").unwrap();
        let policy = LaunchPolicy::RollingPersisted { offset_days: 2 };

        let target = resolve_launch_target(policy, &store, FIXED_LAUNCH_MS);
        assert_eq!(target.as_millis(), FIXED_LAUNCH_MS + 2 * MS_PER_DAY);
        assert_eq!(
            store.get(LAUNCH_DATE_KEY).as_deref(),
            Some("2026-02-03T00:00:00.000Z")
        );
    }
}
