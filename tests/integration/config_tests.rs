use std::path::PathBuf;

use semantle::config::Config;
use semantle::test_utils::PuzzleFixture;

use super::{FRUIT_SECRETS, at};

#[test]
fn test_config_file_drives_app() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    fixture.write_config(
        r#"
[data]
records_path = "scores/log.jsonl"

[puzzle]
first_day = "2022-04-01"
timezone = "UTC"
activate_current_on_startup = true

[display]
nearest_limit = 2
"#,
    );

    let config = Config::load(None, fixture.path()).unwrap();
    assert_eq!(config.data.records_path, PathBuf::from("scores/log.jsonl"));
    assert_eq!(config.display.nearest_limit, 2);

    let ctx = semantle::app::AppContext::open(fixture.path(), config).unwrap();
    ctx.boot(at(2022, 4, 1));
    assert!(ctx.rotation.is_active(0));
    ctx.submit(0, semantle::leaderboard::Submission::new("kim", 2))
        .unwrap();
    assert!(fixture.path().join("scores/log.jsonl").exists());
}

#[test]
fn test_secret_count_mismatch_is_fatal() {
    let fixture = PuzzleFixture::new(&FRUIT_SECRETS);
    let mut config = fixture.config("2022-04-01", "UTC");
    config.puzzle.num_secrets = Some(5);
    assert!(semantle::app::AppContext::open(fixture.path(), config).is_err());
}
