//! Shared simulated clock
//!
//! One logical "current date" for the whole simulation, persisted in the
//! shared store and advanced by exactly one elected timekeeper session.
//! Every other session is a read-only observer. The clock keeps moving
//! while users are offline, which is why account settlement must replay
//! every missed cycle rather than only the most recent one.
//!
//! Leadership is a non-durable first-writer-wins lease: the first session
//! to acquire it advances the clock one simulated day per wall-clock tick
//! and re-checks the lease before every tick, stopping on loss.

use crate::store::MemoryStore;
use chrono::{Days, Months, NaiveDate};
use std::time::Duration;

/// Wall-clock cadence at which the timekeeper should call [`Timekeeper::tick`]
pub const TICK_INTERVAL: Duration = Duration::from_secs(30);

/// Simulated days added per tick
pub const DAYS_PER_TICK: u64 = 1;

/// Fixed clock epoch: far enough in the past that fresh accounts (whose
/// watermarks are set at creation) never replay cycles from before the
/// clock was first observed
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid epoch")
}

/// The first day of the month after `date`
///
/// # Example
/// ```
/// use bank_sim_core_rs::core::clock::first_of_next_month;
/// use chrono::NaiveDate;
///
/// let d = NaiveDate::from_ymd_opt(1900, 12, 15).unwrap();
/// assert_eq!(first_of_next_month(d), NaiveDate::from_ymd_opt(1901, 1, 1).unwrap());
/// ```
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    use chrono::Datelike;
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

/// `date` plus `n` calendar months, day-of-month clamped
pub fn months_after(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_add_months(Months::new(n))
        .expect("date within calendar range")
}

/// `date` plus `n` calendar years
pub fn years_after(date: NaiveDate, n: u32) -> NaiveDate {
    months_after(date, n * 12)
}

/// `date` plus `n` days
pub fn days_after(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n))
        .expect("date within calendar range")
}

/// Handle held by the session elected to advance the shared clock
///
/// Obtained from [`Timekeeper::elect`], which wins or loses the store's
/// session lease. The advance loop self-cancels: every [`tick`] re-checks
/// the lease and returns `None` once it is lost.
///
/// [`tick`]: Timekeeper::tick
#[derive(Debug)]
pub struct Timekeeper {
    session_id: String,
}

impl Timekeeper {
    /// Try to become the timekeeper for `session_id`
    ///
    /// First writer wins; returns `None` when another live session
    /// already holds the lease.
    pub fn elect(store: &MemoryStore, session_id: &str) -> Option<Self> {
        if store.try_acquire_timekeeper(session_id) {
            Some(Self {
                session_id: session_id.to_string(),
            })
        } else {
            None
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Advance the shared clock by one tick ([`DAYS_PER_TICK`] days)
    ///
    /// Returns the new date, or `None` when this session no longer holds
    /// the lease (the caller should stop its advance loop).
    pub fn tick(&self, store: &MemoryStore) -> Option<NaiveDate> {
        if !store.is_timekeeper(&self.session_id) {
            return None;
        }
        let next = days_after(store.read_clock(), DAYS_PER_TICK);
        store.write_clock(next);
        Some(next)
    }

    /// Give up the lease, letting another session win the next election
    pub fn resign(&self, store: &MemoryStore) {
        store.release_timekeeper(&self.session_id);
    }
}

/// Whole simulated days between two dates (negative when `to < from`)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_of_next_month_mid_year() {
        assert_eq!(first_of_next_month(date(1900, 7, 1)), date(1900, 8, 1));
        assert_eq!(first_of_next_month(date(1900, 7, 31)), date(1900, 8, 1));
    }

    #[test]
    fn test_years_after_decade() {
        assert_eq!(years_after(date(1900, 3, 15), 10), date(1910, 3, 15));
    }

    #[test]
    fn test_days_between_signed() {
        assert_eq!(days_between(date(1900, 1, 1), date(1900, 1, 31)), 30);
        assert_eq!(days_between(date(1900, 1, 31), date(1900, 1, 1)), -30);
    }
}
