use semantle::SemantleError;
use semantle::leaderboard::Submission;
use semantle::test_utils::{PuzzleFixture, capture_logs};

use super::{FRUIT_SECRETS, at, fruit_config, open};

#[test]
fn test_submissions_survive_restart() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let first = open(&fixture, fruit_config(&fixture));
    for (day, name, count) in [(0, "alice", 9), (0, "bob", 4), (1, "carol", 12), (0, "dave", 4)] {
        first.submit(day, Submission::new(name, count)).unwrap();
    }
    let before = first.leaderboard(0);
    drop(first);

    let second = open(&fixture, fruit_config(&fixture));
    assert_eq!(second.leaderboard(0), before);
    let names: Vec<String> = before.into_iter().map(|r| r.nickname).collect();
    assert_eq!(names, vec!["bob", "dave", "alice"]);
    assert_eq!(second.leader(1).unwrap().nickname, "carol");
}

#[test]
fn test_days_listing_carries_leaders() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    ctx.submit(1, Submission::new("lee", 6)).unwrap();

    let days = ctx.days(at(2022, 4, 3));
    let listed: Vec<usize> = days.iter().map(|d| d.day).collect();
    assert_eq!(listed, vec![0, 1]);
    assert!(days[0].leader.is_none());
    assert_eq!(days[1].leader.as_ref().unwrap().nickname, "lee");
}

#[test]
fn test_submission_outside_catalog_rejected() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    let err = ctx.submit(3, Submission::new("x", 1)).unwrap_err();
    assert!(matches!(err, SemantleError::InvalidRecord(_)));
    assert!(ctx.leaderboard(3).is_empty());
}

#[test]
fn test_accepted_submission_is_logged() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));

    let (placement, logs) = capture_logs(|| ctx.submit(2, Submission::new("  park ", 3)));
    let placement = placement.unwrap();
    assert_eq!(placement.record.nickname, "park");
    assert_eq!(placement.position, 1);

    let accepted = logs
        .iter()
        .find(|entry| entry.message == "submission accepted")
        .unwrap();
    assert_eq!(accepted.field("day"), Some("2"));
    assert!(fixture.records_path().exists());
}
