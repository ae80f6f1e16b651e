use semantle::SemantleError;
use semantle::guess::GuessRank;
use semantle::test_utils::{PuzzleFixture, TestCase, run_table_tests};

use super::{FRUIT_SECRETS, at, fruit_config, open};

#[test]
fn test_fruit_ranking() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    ctx.boot(at(2022, 4, 3));

    let cases = vec![
        TestCase {
            name: "secret itself",
            input: "apple",
            expected: Some("solved".to_string()),
        },
        TestCase {
            name: "secret in another casing",
            input: "APPLE",
            expected: Some("solved".to_string()),
        },
        TestCase {
            name: "closest word",
            input: "banana",
            expected: Some("1".to_string()),
        },
        TestCase {
            name: "orthogonal word",
            input: "durian",
            expected: Some("2".to_string()),
        },
        TestCase {
            name: "opposite word",
            input: "Cherry",
            expected: Some("3".to_string()),
        },
        TestCase {
            name: "unknown word",
            input: "zucchini",
            expected: None,
        },
    ];

    run_table_tests(cases, |word| {
        ctx.evaluate(0, word).ok().map(|o| o.rank.to_string())
    })
    .unwrap();
}

#[test]
fn test_nearest_table_matches_guess_results() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    ctx.boot(at(2022, 4, 3));

    let nearest = ctx.nearest(1, 10).unwrap();
    let words: Vec<&str> = nearest.iter().map(|n| n.word.as_str()).collect();
    assert_eq!(words.len(), 3);
    assert!(!words.contains(&"banana"));

    for neighbor in &nearest {
        let outcome = ctx.evaluate(1, &neighbor.word).unwrap();
        assert_eq!(outcome.rank, GuessRank::Ranked { rank: neighbor.rank });
        assert!((outcome.similarity - neighbor.similarity).abs() < 1e-12);
    }
    assert_eq!(ctx.nearest(1, 1).unwrap().len(), 1);
}

#[test]
fn test_out_of_table_word_scored_on_demand() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    fixture.write("data/extra.txt", "elderberry 0.6 0.8\n");
    let mut config = fruit_config(&fixture);
    config.data.embeddings_path = Some("data/extra.txt".into());
    let ctx = open(&fixture, config);
    ctx.boot(at(2022, 4, 3));

    let outcome = ctx.evaluate(0, "elderberry").unwrap();
    assert_eq!(outcome.rank, GuessRank::Beyond { table_size: 3 });
    assert!((outcome.similarity - 0.6).abs() < 1e-6);
    assert!(ctx.nearest(0, 100).unwrap().iter().all(|n| n.word != "elderberry"));
}

#[test]
fn test_reveal_and_yesterday() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    ctx.boot(at(2022, 4, 3));

    assert_eq!(ctx.reveal(1).unwrap(), "banana");
    assert!(matches!(ctx.reveal(2), Err(SemantleError::PuzzleNotActive(2))));
    assert_eq!(ctx.yesterday(2).as_deref(), Some("banana"));
    // Day 0 wraps to day 2, which is not active yet.
    assert_eq!(ctx.yesterday(0), None);
}

#[test]
fn test_similarity_summary_includes_leader() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    ctx.boot(at(2022, 4, 3));

    let summary = ctx.similarity(0).unwrap();
    let stats = summary.stats.unwrap();
    assert!(stats.top >= stats.top10);
    assert!((stats.rest + 1.0).abs() < 1e-9);
    assert!(summary.leader.is_none());

    ctx.submit(0, semantle::leaderboard::Submission::new("kim", 4))
        .unwrap();
    assert_eq!(ctx.similarity(0).unwrap().leader.unwrap().nickname, "kim");
}
