use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SemantleError};

/// Config file looked up under the root when none is given explicitly.
pub const CONFIG_FILENAME: &str = "semantle.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub puzzle: PuzzleConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Defaults, then the config file, then `SEMANTLE_*` environment
    /// overrides.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let named = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SEMANTLE_CONFIG").ok().map(PathBuf::from));
        // Only the implicit root file may be absent.
        if let Some(path) = named.as_ref().filter(|path| !path.exists()) {
            return Err(SemantleError::MissingConfig(path.display().to_string()));
        }
        let path = named.unwrap_or_else(|| root.join(CONFIG_FILENAME));

        if let Some(patch) = Self::load_patch(&path)? {
            config.merge_patch(patch);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SemantleError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SemantleError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.data {
            self.data.merge(patch);
        }
        if let Some(patch) = patch.puzzle {
            self.puzzle.merge(patch);
        }
        if let Some(patch) = patch.cache {
            self.cache.merge(patch);
        }
        if let Some(patch) = patch.display {
            self.display.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("SEMANTLE_VOCABULARY_PATH") {
            self.data.vocabulary_path = PathBuf::from(value);
        }
        if let Some(value) = env_string("SEMANTLE_EMBEDDINGS_PATH") {
            self.data.embeddings_path = Some(PathBuf::from(value));
        }
        if let Some(value) = env_string("SEMANTLE_SECRETS_PATH") {
            self.data.secrets_path = PathBuf::from(value);
        }
        if let Some(value) = env_string("SEMANTLE_RECORDS_PATH") {
            self.data.records_path = PathBuf::from(value);
        }

        if let Some(value) = env_string("SEMANTLE_FIRST_DAY") {
            self.puzzle.first_day = parse_date("SEMANTLE_FIRST_DAY", &value)?;
        }
        if let Some(value) = env_string("SEMANTLE_TIMEZONE") {
            self.puzzle.timezone = value;
        }
        if let Some(value) = env_usize("SEMANTLE_NUM_SECRETS")? {
            self.puzzle.num_secrets = Some(value);
        }
        if let Some(value) = env_bool("SEMANTLE_ACTIVATE_CURRENT_ON_STARTUP")? {
            self.puzzle.activate_current_on_startup = value;
        }

        if let Some(value) = env_usize("SEMANTLE_RETAINED_DAYS")? {
            self.cache.retained_days = Some(value);
        }

        if let Some(value) = env_usize("SEMANTLE_NEAREST_LIMIT")? {
            self.display.nearest_limit = value;
        }

        Ok(())
    }

    /// Reject values that would only fail later, at activation time.
    pub fn validate(&self) -> Result<()> {
        self.puzzle.timezone()?;
        if self.puzzle.num_secrets == Some(0) {
            return Err(SemantleError::Config(
                "puzzle.num_secrets must be at least 1".to_string(),
            ));
        }
        if self.cache.retained_days == Some(0) {
            return Err(SemantleError::Config(
                "cache.retained_days must be at least 1".to_string(),
            ));
        }
        if self.display.nearest_limit == 0 {
            return Err(SemantleError::Config(
                "display.nearest_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Ranking vocabulary, word2vec text format
    #[serde(default)]
    pub vocabulary_path: PathBuf,
    /// Wider embedding space used only for fallback similarity
    #[serde(default)]
    pub embeddings_path: Option<PathBuf>,
    #[serde(default)]
    pub secrets_path: PathBuf,
    #[serde(default)]
    pub records_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            vocabulary_path: PathBuf::from("data/vocabulary.txt"),
            embeddings_path: None,
            secrets_path: PathBuf::from("data/secrets.txt"),
            records_path: PathBuf::from("data/records.jsonl"),
        }
    }
}

impl DataConfig {
    fn merge(&mut self, patch: DataPatch) {
        if let Some(value) = patch.vocabulary_path {
            self.vocabulary_path = value;
        }
        if let Some(value) = patch.embeddings_path {
            self.embeddings_path = Some(value);
        }
        if let Some(value) = patch.secrets_path {
            self.secrets_path = value;
        }
        if let Some(value) = patch.records_path {
            self.records_path = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default = "default_first_day")]
    pub first_day: NaiveDate,
    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Defaults to the catalog length
    #[serde(default)]
    pub num_secrets: Option<usize>,
    /// Also activate today's puzzle at boot instead of waiting for midnight
    #[serde(default)]
    pub activate_current_on_startup: bool,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            first_day: default_first_day(),
            timezone: default_timezone(),
            num_secrets: None,
            activate_current_on_startup: false,
        }
    }
}

impl PuzzleConfig {
    fn merge(&mut self, patch: PuzzlePatch) {
        if let Some(value) = patch.first_day {
            self.first_day = value;
        }
        if let Some(value) = patch.timezone {
            self.timezone = value;
        }
        if let Some(value) = patch.num_secrets {
            self.num_secrets = Some(value);
        }
        if let Some(value) = patch.activate_current_on_startup {
            self.activate_current_on_startup = value;
        }
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|err| {
            SemantleError::Config(format!("invalid timezone {}: {err}", self.timezone))
        })
    }
}

fn default_first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 4, 1).unwrap_or_default()
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Upper bound on resident nearest tables; unbounded when unset
    #[serde(default)]
    pub retained_days: Option<usize>,
}

impl CacheConfig {
    fn merge(&mut self, patch: CachePatch) {
        if let Some(value) = patch.retained_days {
            self.retained_days = Some(value);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Default length of the nearest listing
    #[serde(default = "default_nearest_limit")]
    pub nearest_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            nearest_limit: default_nearest_limit(),
        }
    }
}

const fn default_nearest_limit() -> usize {
    1000
}

impl DisplayConfig {
    fn merge(&mut self, patch: DisplayPatch) {
        if let Some(value) = patch.nearest_limit {
            self.nearest_limit = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub data: Option<DataPatch>,
    pub puzzle: Option<PuzzlePatch>,
    pub cache: Option<CachePatch>,
    pub display: Option<DisplayPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataPatch {
    pub vocabulary_path: Option<PathBuf>,
    pub embeddings_path: Option<PathBuf>,
    pub secrets_path: Option<PathBuf>,
    pub records_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PuzzlePatch {
    pub first_day: Option<NaiveDate>,
    pub timezone: Option<String>,
    pub num_secrets: Option<usize>,
    pub activate_current_on_startup: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CachePatch {
    pub retained_days: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DisplayPatch {
    pub nearest_limit: Option<usize>,
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| SemantleError::Config(format!("invalid {key} value {value}: {err}")))
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Result<Option<bool>> {
    match std::env::var(key) {
        Ok(value) => parse_bool(key, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SemantleError::Config(format!(
            "invalid {key} value {value}: expected true/false"
        ))),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            SemantleError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.puzzle.timezone, "Asia/Seoul");
        assert_eq!(config.puzzle.first_day, NaiveDate::from_ymd_opt(2022, 4, 1).unwrap());
        assert!(!config.puzzle.activate_current_on_startup);
        assert_eq!(config.cache.retained_days, None);
        assert_eq!(config.display.nearest_limit, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_patch_merges_over_defaults() {
        let mut config = Config::default();
        let patch: ConfigPatch = toml::from_str(
            r#"
            [puzzle]
            first_day = "2023-01-15"
            timezone = "Europe/Berlin"

            [cache]
            retained_days = 30
            "#,
        )
        .unwrap();
        config.merge_patch(patch);

        assert_eq!(config.puzzle.first_day, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(config.puzzle.timezone().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(config.cache.retained_days, Some(30));
        // untouched sections keep their defaults
        assert_eq!(config.data.secrets_path, PathBuf::from("data/secrets.txt"));
        assert_eq!(config.display.nearest_limit, 1000);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.puzzle.timezone = "Mars/Olympus".to_string();
        assert!(matches!(config.validate(), Err(SemantleError::Config(_))));

        let mut config = Config::default();
        config.cache.retained_days = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.nearest_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("K", "yes").unwrap());
        assert!(parse_bool("K", " TRUE ").unwrap());
        assert!(!parse_bool("K", "off").unwrap());
        assert!(!parse_bool("K", "0").unwrap());
        let err = parse_bool("K", "ture").unwrap_err();
        assert!(matches!(err, SemantleError::Config(msg) if msg.contains("ture")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, SemantleError::MissingConfig(path) if path.ends_with("absent.toml")));
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("K", "2022-04-01").is_ok());
        assert!(parse_date("K", "04/01/2022").is_err());
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[data]\nvocabulary_path = \"vec/ko.txt\"\n[display]\nnearest_limit = 50\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), dir.path()).unwrap();
        assert_eq!(config.data.vocabulary_path, PathBuf::from("vec/ko.txt"));
        assert_eq!(config.display.nearest_limit, 50);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[puzzle\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path), dir.path()),
            Err(SemantleError::Config(_))
        ));
    }
}
