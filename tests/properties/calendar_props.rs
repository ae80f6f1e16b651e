use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use semantle::puzzle::PuzzleCalendar;

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 4, 1).unwrap()
}

proptest! {
    #[test]
    fn test_index_is_days_elapsed_mod_catalog(days in 0i64..20_000, num_secrets in 1usize..500, hour in 0u32..24) {
        let calendar = PuzzleCalendar::new(first_day(), chrono_tz::UTC, num_secrets).unwrap();
        let start = Utc.with_ymd_and_hms(2022, 4, 1, hour, 0, 0).unwrap();
        let now = start + Duration::days(days);

        let expected = usize::try_from(days).unwrap() % num_secrets;
        prop_assert_eq!(calendar.current_index(now), expected);
    }

    #[test]
    fn test_index_repeats_every_catalog_length(days in -5_000i64..5_000, num_secrets in 1usize..400) {
        let calendar = PuzzleCalendar::new(first_day(), chrono_tz::Asia::Seoul, num_secrets).unwrap();
        let now = Utc.with_ymd_and_hms(2022, 4, 1, 3, 0, 0).unwrap() + Duration::days(days);
        let later = now + Duration::days(i64::try_from(num_secrets).unwrap());

        let here = calendar.position(now);
        let there = calendar.position(later);
        prop_assert_eq!(here.index, there.index);
        prop_assert_eq!(here.cycle + 1, there.cycle);
        prop_assert!(here.index < num_secrets);
    }

    #[test]
    fn test_next_rollover_is_future_local_midnight(minutes in 0i64..(60 * 24 * 400)) {
        let calendar = PuzzleCalendar::new(first_day(), chrono_tz::America::Santiago, 7).unwrap();
        let now = Utc.with_ymd_and_hms(2022, 4, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        let next = calendar.next_rollover(now);

        prop_assert!(next > now);
        prop_assert!(next - now <= Duration::hours(25));
        prop_assert_eq!(calendar.local_date(next), calendar.local_date(now).succ_opt().unwrap());
    }
}
