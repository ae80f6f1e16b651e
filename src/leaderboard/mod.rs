//! Leaderboards for completed games.
//!
//! [`Scoreboard`] is the submission boundary: it stamps a submission into a
//! [`ScoreRecord`], appends it to the durable log and only then ingests it
//! into the in-memory [`LeaderboardBook`]. Both steps run under one write
//! lock, so the log order is the ingest order and replaying the log after a
//! restart reproduces the same leaderboards.

pub mod book;
pub mod log;
pub mod record;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

pub use book::LeaderboardBook;
pub use log::RecordLog;
pub use record::{ScoreRecord, Submission};

/// Where an accepted submission landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub record: ScoreRecord,
    /// 1-based position on the day's leaderboard at submission time
    pub position: usize,
    pub total: usize,
}

struct ScoreboardState {
    book: LeaderboardBook,
    log: Option<RecordLog>,
}

pub struct Scoreboard {
    state: RwLock<ScoreboardState>,
}

impl Scoreboard {
    /// A scoreboard without a durable log.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(ScoreboardState {
                book: LeaderboardBook::new(),
                log: None,
            }),
        }
    }

    /// Replay the log at `path` and keep it open for appends.
    pub fn open(path: &Path) -> Result<Self> {
        let book = LeaderboardBook::replay(log::replay(path)?);
        let log = RecordLog::open(path)?;
        info!(records = book.len(), days = book.days().count(), "leaderboards restored");
        Ok(Self {
            state: RwLock::new(ScoreboardState {
                book,
                log: Some(log),
            }),
        })
    }

    /// Accept a submission with a server-assigned timestamp.
    pub fn submit(&self, day: usize, submission: Submission) -> Result<Placement> {
        self.submit_at(day, submission, Utc::now())
    }

    /// Accept a submission stamped with `timestamp`.
    ///
    /// Nothing reaches memory unless the log append succeeded.
    pub fn submit_at(
        &self,
        day: usize,
        submission: Submission,
        timestamp: DateTime<Utc>,
    ) -> Result<Placement> {
        let record = submission.into_record(day, timestamp)?;

        let mut state = self.state.write();
        if let Some(log) = state.log.as_mut() {
            log.append(&record)?;
        }
        let position = state.book.ingest(record.clone());
        let total = state.book.leaderboard(day).len();
        info!(day, nickname = %record.nickname, guess_count = record.guess_count, position, "record added");

        Ok(Placement {
            record,
            position,
            total,
        })
    }

    /// Snapshot of a day's leaderboard, best first.
    #[must_use]
    pub fn leaderboard(&self, day: usize) -> Vec<ScoreRecord> {
        self.state.read().book.leaderboard(day).to_vec()
    }

    #[must_use]
    pub fn leader(&self, day: usize) -> Option<ScoreRecord> {
        self.state.read().book.leader(day).cloned()
    }

    /// Current leader of every day that has one.
    #[must_use]
    pub fn leaders(&self) -> BTreeMap<usize, ScoreRecord> {
        let state = self.state.read();
        state
            .book
            .days()
            .filter_map(|day| state.book.leader(day).map(|r| (day, r.clone())))
            .collect()
    }

    /// Copy of the whole in-memory state.
    #[must_use]
    pub fn book(&self) -> LeaderboardBook {
        self.state.read().book.clone()
    }
}
