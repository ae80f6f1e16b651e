use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{CONFIG_FILENAME, Config};

/// Two-dimensional fruit vocabulary used across tests.
///
/// Against `apple`, `banana` ranks first and `cherry` last.
pub const FRUIT_VOCABULARY: &str = "\
4 2
apple 1.0 0.0
banana 0.9 0.1
cherry -1.0 0.0
durian 0.0 1.0
";

/// Isolated data root with vocabulary, secrets and score log snapshots.
pub struct PuzzleFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl PuzzleFixture {
    /// Fruit vocabulary with the given secret catalog.
    #[must_use]
    pub fn new(secrets: &[&str]) -> Self {
        let fixture = Self::empty();
        fixture.write("data/vocabulary.txt", FRUIT_VOCABULARY);
        fixture.write_secrets(secrets);
        fixture
    }

    /// A root with no files in it.
    #[must_use]
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        println!("[FIXTURE] Created temp directory: {root:?}");
        Self { temp_dir, root }
    }

    /// Write a file relative to the root.
    pub fn write(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    pub fn write_secrets(&self, secrets: &[&str]) -> PathBuf {
        let mut content = secrets.join("\n");
        content.push('\n');
        self.write("data/secrets.txt", &content)
    }

    /// Write `semantle.toml` at the root.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        self.write(CONFIG_FILENAME, toml)
    }

    /// Default config with the given first day and timezone.
    #[must_use]
    pub fn config(&self, first_day: &str, timezone: &str) -> Config {
        let mut config = Config::default();
        config.puzzle.first_day = first_day.parse().expect("valid first day");
        config.puzzle.timezone = timezone.to_string();
        config
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn records_path(&self) -> PathBuf {
        self.root.join("data/records.jsonl")
    }
}

impl Drop for PuzzleFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.root);
    }
}
