use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::{CONFIG_FILENAME, Config};
use crate::error::{Result, SemantleError};
use crate::guess::{GuessEvaluator, GuessOutcome};
use crate::leaderboard::{Placement, ScoreRecord, Scoreboard, Submission};
use crate::puzzle::{BackfillReport, PuzzleCalendar, PuzzleRotation, SecretCatalog};
use crate::similarity::{NearestTable, Neighbor, SimilarityStats, VectorStore};

/// Similarity landmarks of a day plus its current leader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilaritySummary {
    pub day: usize,
    #[serde(flatten)]
    pub stats: Option<SimilarityStats>,
    pub leader: Option<ScoreRecord>,
}

/// One row of the day listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub day: usize,
    pub leader: Option<ScoreRecord>,
}

/// Process-wide state: one vector store, one catalog, one set of nearest
/// tables and one set of leaderboards, shared by reference.
pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub rotation: Arc<PuzzleRotation>,
    pub scoreboard: Arc<Scoreboard>,
    pub robot_mode: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let mut ctx = Self::open(&root, config)?;
        ctx.robot_mode = cli.robot;
        ctx.verbosity = cli.verbose;
        Ok(ctx)
    }

    /// Load every startup snapshot. Any failure here is fatal.
    ///
    /// No nearest table is built yet; see [`Self::boot`].
    pub fn open(root: &Path, config: Config) -> Result<Self> {
        let data = &config.data;
        let store = VectorStore::load(
            &root.join(&data.vocabulary_path),
            data.embeddings_path
                .as_ref()
                .map(|path| root.join(path))
                .as_deref(),
        )?;
        let catalog = SecretCatalog::load(&root.join(&data.secrets_path), config.puzzle.num_secrets)?;
        let calendar = PuzzleCalendar::new(
            config.puzzle.first_day,
            config.puzzle.timezone()?,
            catalog.len(),
        )?;
        let rotation = PuzzleRotation::new(
            Arc::new(store),
            Arc::new(catalog),
            calendar,
            config.cache.retained_days,
        );
        let scoreboard = Scoreboard::open(&root.join(&data.records_path))?;

        Ok(Self {
            root: root.to_path_buf(),
            config,
            rotation: Arc::new(rotation),
            scoreboard: Arc::new(scoreboard),
            robot_mode: false,
            verbosity: 0,
        })
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("SEMANTLE_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, CONFIG_FILENAME)? {
            return Ok(found);
        }
        Ok(cwd)
    }

    /// Server boot: backfill every puzzle before today. Today stays
    /// inactive until the midnight trigger unless
    /// `puzzle.activate_current_on_startup` is set.
    pub fn boot(&self, now: DateTime<Utc>) -> BackfillReport {
        let mut report = self.rotation.backfill(now);
        if self.config.puzzle.activate_current_on_startup {
            match self.rotation.rotate(now) {
                Ok(_) => report.activated += 1,
                Err(err) => {
                    tracing::error!(error = %err, "activating today at startup failed");
                    report.failed.push(self.rotation.current_index(now));
                }
            }
        }
        report
    }

    /// Whether [`Self::boot`] at `now` would activate `day`.
    #[must_use]
    pub fn boot_activates(&self, day: usize, now: DateTime<Utc>) -> bool {
        self.rotation.backfill_range(now).contains(&day)
            || (self.config.puzzle.activate_current_on_startup
                && day == self.rotation.current_index(now))
    }

    /// Activate just `day`, and only if a full boot would have.
    ///
    /// One-shot commands use this instead of paying for the whole backfill.
    pub fn ensure_booted(&self, day: usize, now: DateTime<Utc>) -> Result<()> {
        if self.boot_activates(day, now) && !self.rotation.is_active(day) {
            let cycle = self.rotation.calendar().position(now).cycle;
            self.rotation.activate_at(day, cycle)?;
        }
        Ok(())
    }

    /// Puzzle indices a full boot at `now` leaves active, ascending.
    #[must_use]
    pub fn booted_days(&self, now: DateTime<Utc>) -> Vec<usize> {
        let current = self.rotation.current_index(now);
        let mut days: Vec<usize> = self.rotation.backfill_range(now).collect();
        if self.config.puzzle.activate_current_on_startup || self.rotation.is_active(current) {
            days.push(current);
        }
        days
    }

    #[must_use]
    pub fn current_index(&self, now: DateTime<Utc>) -> usize {
        self.rotation.current_index(now)
    }

    pub fn evaluate(&self, day: usize, word: &str) -> Result<GuessOutcome> {
        GuessEvaluator::new(&self.rotation).evaluate(day, word)
    }

    pub fn nearest_table(&self, day: usize) -> Result<Arc<NearestTable>> {
        self.rotation.table(day)
    }

    /// Top `limit` neighbors of a day's secret, in rank order.
    pub fn nearest(&self, day: usize, limit: usize) -> Result<Vec<Neighbor>> {
        Ok(self.rotation.table(day)?.top(limit).to_vec())
    }

    pub fn similarity(&self, day: usize) -> Result<SimilaritySummary> {
        let table = self.rotation.table(day)?;
        Ok(SimilaritySummary {
            day,
            stats: table.stats(),
            leader: self.scoreboard.leader(day),
        })
    }

    /// Give up: the secret of an active day.
    pub fn reveal(&self, day: usize) -> Result<String> {
        self.rotation.secret(day).map(ToString::to_string)
    }

    #[must_use]
    pub fn yesterday(&self, today: usize) -> Option<String> {
        self.rotation.yesterday(today).map(ToString::to_string)
    }

    /// Days playable at `now` with their leaders, ascending.
    ///
    /// Covers what a full boot activates plus anything activated since.
    #[must_use]
    pub fn days(&self, now: DateTime<Utc>) -> Vec<DaySummary> {
        let leaders = self.scoreboard.leaders();
        let mut days = self.booted_days(now);
        days.extend(self.rotation.active_days());
        days.sort_unstable();
        days.dedup();
        days.into_iter()
            .map(|day| DaySummary {
                day,
                leader: leaders.get(&day).cloned(),
            })
            .collect()
    }

    #[must_use]
    pub fn leaderboard(&self, day: usize) -> Vec<ScoreRecord> {
        self.scoreboard.leaderboard(day)
    }

    #[must_use]
    pub fn leader(&self, day: usize) -> Option<ScoreRecord> {
        self.scoreboard.leader(day)
    }

    /// Record a finished game for `day`.
    pub fn submit(&self, day: usize, submission: Submission) -> Result<Placement> {
        let num_secrets = self.rotation.calendar().num_secrets();
        if day >= num_secrets {
            return Err(SemantleError::InvalidRecord(format!(
                "day {day} is outside 0..{num_secrets}"
            )));
        }
        let placement = self.scoreboard.submit(day, submission)?;
        info!(day, position = placement.position, "submission accepted");
        Ok(placement)
    }
}

fn find_upwards(start: &Path, name: &str) -> Result<Option<PathBuf>> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(name).is_file() {
            return Ok(Some(dir.to_path_buf()));
        }
        current = dir.parent();
    }
    Ok(None)
}
