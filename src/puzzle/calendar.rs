//! Calendar math: wall-clock instant -> puzzle index.
//!
//! Days are counted in a fixed IANA timezone from a fixed first day, and the
//! count wraps around the secret catalog. The quotient of that division is
//! the "cycle", which tells a table built on one pass through the catalog
//! apart from the next pass.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, SemantleError};

/// Where an instant falls in the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PuzzlePosition {
    pub index: usize,
    pub cycle: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleCalendar {
    first_day: NaiveDate,
    timezone: Tz,
    num_secrets: usize,
}

impl PuzzleCalendar {
    pub fn new(first_day: NaiveDate, timezone: Tz, num_secrets: usize) -> Result<Self> {
        if num_secrets == 0 {
            return Err(SemantleError::Config(
                "num_secrets must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            first_day,
            timezone,
            num_secrets,
        })
    }

    /// Calendar date of `now` in the puzzle timezone.
    #[must_use]
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    /// Signed day count from the first day; negative before it.
    #[must_use]
    pub fn days_since_epoch(&self, now: DateTime<Utc>) -> i64 {
        self.local_date(now)
            .signed_duration_since(self.first_day)
            .num_days()
    }

    #[must_use]
    pub fn position(&self, now: DateTime<Utc>) -> PuzzlePosition {
        let days = self.days_since_epoch(now);
        let n = self.num_secrets as i64;
        PuzzlePosition {
            index: days.rem_euclid(n) as usize,
            cycle: days.div_euclid(n),
        }
    }

    /// Puzzle index for `now`, always in `[0, num_secrets)`.
    #[must_use]
    pub fn current_index(&self, now: DateTime<Utc>) -> usize {
        self.position(now).index
    }

    /// The index before `index`, wrapping at zero.
    #[must_use]
    pub const fn previous(&self, index: usize) -> usize {
        (index % self.num_secrets + self.num_secrets - 1) % self.num_secrets
    }

    /// First instant of the next local calendar day.
    #[must_use]
    pub fn next_rollover(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let Some(tomorrow) = self.local_date(now).succ_opt() else {
            return now + Duration::days(1);
        };
        let midnight = tomorrow.and_time(NaiveTime::MIN);
        // A DST gap can swallow local midnight; take the first hour that exists.
        (0..24)
            .find_map(|hour| {
                self.timezone
                    .from_local_datetime(&(midnight + Duration::hours(hour)))
                    .earliest()
            })
            .map_or_else(|| now + Duration::days(1), |local| local.with_timezone(&Utc))
    }

    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    #[must_use]
    pub const fn num_secrets(&self) -> usize {
        self.num_secrets
    }
}
