//! End-to-end tests through `AppContext` against on-disk snapshots.

mod boot_tests;
mod config_tests;
mod guess_tests;
mod leaderboard_tests;

use chrono::{DateTime, TimeZone, Utc};

use semantle::app::AppContext;
use semantle::config::Config;
use semantle::test_utils::PuzzleFixture;

pub const FRUIT_SECRETS: [&str; 3] = ["apple", "banana", "cherry"];

/// Noon UTC on the given date.
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Fruit fixture whose calendar starts 2022-04-01 in UTC.
pub fn fruit_config(fixture: &PuzzleFixture) -> Config {
    fixture.config("2022-04-01", "UTC")
}

pub fn open(fixture: &PuzzleFixture, config: Config) -> AppContext {
    AppContext::open(fixture.path(), config).unwrap()
}
