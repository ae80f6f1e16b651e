use semantle::SemantleError;
use semantle::test_utils::PuzzleFixture;

use super::{FRUIT_SECRETS, at, fruit_config, open};

#[test]
fn test_boot_backfills_history_but_not_today() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    let now = at(2022, 4, 3);

    assert_eq!(ctx.current_index(now), 2);
    let report = ctx.boot(now);
    assert_eq!(report.activated, 2);
    assert!(report.failed.is_empty());

    assert_eq!(ctx.rotation.active_days(), vec![0, 1]);
    assert!(matches!(
        ctx.evaluate(2, "apple"),
        Err(SemantleError::PuzzleNotActive(2))
    ));
}

#[test]
fn test_boot_can_activate_today() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let mut config = fruit_config(&fixture);
    config.puzzle.activate_current_on_startup = true;
    let ctx = open(&fixture, config);
    let now = at(2022, 4, 3);

    let report = ctx.boot(now);
    assert_eq!(report.activated, 3);
    assert_eq!(ctx.booted_days(now), vec![0, 1, 2]);
    assert!(ctx.evaluate(2, "cherry").unwrap().is_solved());
}

#[test]
fn test_ensure_booted_activates_only_the_queried_day() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));
    let now = at(2022, 4, 3);

    ctx.ensure_booted(1, now).unwrap();
    assert_eq!(ctx.rotation.active_days(), vec![1]);

    // Today is not part of the boot set, so this stays inactive.
    ctx.ensure_booted(2, now).unwrap();
    assert!(!ctx.rotation.is_active(2));
}

#[test]
fn test_wraparound_rebuilds_for_new_cycle() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let ctx = open(&fixture, fruit_config(&fixture));

    ctx.boot(at(2022, 4, 3));
    assert_eq!(ctx.nearest_table(0).unwrap().cycle(), 0);

    let table = ctx.rotation.rotate(at(2022, 4, 4)).unwrap();
    assert_eq!(table.puzzle(), 0);
    assert_eq!(table.cycle(), 1);
    assert_eq!(ctx.nearest_table(0).unwrap().cycle(), 1);
}

#[test]
fn test_evicted_table_is_restored_on_read() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let mut config = fruit_config(&fixture);
    config.cache.retained_days = Some(1);
    let ctx = open(&fixture, config);

    ctx.boot(at(2022, 4, 3));
    assert_eq!(ctx.rotation.resident_tables(), 1);

    let outcome = ctx.evaluate(0, "banana").unwrap();
    assert_eq!(outcome.rank.to_string(), "1");
    assert!(ctx.rotation.cache_stats().evictions >= 1);
    assert_eq!(ctx.rotation.active_days(), vec![0, 1]);
}

#[test]
fn test_missing_secret_embedding_fails_only_that_day() {
    let fixture = PuzzleFixture::new(&["apple", "quince", "cherry"]);
    let ctx = open(&fixture, fruit_config(&fixture));

    let report = ctx.boot(at(2022, 4, 3));
    assert_eq!(report.activated, 1);
    assert_eq!(report.failed, vec![1]);
    assert!(ctx.rotation.is_active(0));
    assert!(!ctx.rotation.is_active(1));
}

#[test]
fn test_startup_fails_on_missing_vocabulary() {
    let fixture = PuzzleFixture::empty();
    fixture.write_secrets(&FRUIT_SECRETS);
    let result = semantle::app::AppContext::open(fixture.path(), fruit_config(&fixture));
    assert!(result.is_err());
}
