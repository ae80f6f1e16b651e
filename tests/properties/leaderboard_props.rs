use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use semantle::leaderboard::{LeaderboardBook, Scoreboard, Submission, log};

fn submissions() -> impl Strategy<Value = Vec<(usize, u32, String)>> {
    prop::collection::vec((0usize..4, 1u32..60, "[a-z]{1,8}"), 0..40)
}

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_650_000_000, 0).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_leaderboards_sorted_by_count_then_arrival(
        entries in submissions(),
        offsets in prop::collection::vec(-3_600i64..3_600, 40),
    ) {
        let board = Scoreboard::in_memory();
        for (i, (day, count, name)) in entries.iter().enumerate() {
            // Timestamps deliberately disagree with arrival order.
            let at = base_time() + Duration::seconds(offsets[i]);
            board.submit_at(*day, Submission::new(format!("{name}-{i}"), *count), at).unwrap();
        }

        for day in 0..4 {
            let mut expected: Vec<(u32, String)> = entries
                .iter()
                .enumerate()
                .filter(|(_, (d, _, _))| *d == day)
                .map(|(i, (_, count, name))| (*count, format!("{name}-{i}")))
                .collect();
            expected.sort_by_key(|(count, _)| *count);

            let records = board.leaderboard(day);
            let actual: Vec<(u32, String)> = records
                .iter()
                .map(|r| (r.guess_count, r.nickname.clone()))
                .collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(board.leader(day), records.first().cloned());
        }
    }

    #[test]
    fn test_replay_reproduces_live_state(entries in submissions()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        let live = Scoreboard::open(&path).unwrap();
        for (i, (day, count, name)) in entries.iter().enumerate() {
            // Identical timestamps exercise the arrival-order tie break.
            let at = base_time() + Duration::seconds(i64::try_from(i / 3).unwrap());
            live.submit_at(*day, Submission::new(name.clone(), *count), at).unwrap();
        }

        let replayed = LeaderboardBook::replay(log::replay(&path).unwrap());
        prop_assert_eq!(&replayed, &live.book());
        prop_assert_eq!(replayed.len(), entries.len());
    }
}
