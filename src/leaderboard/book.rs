//! In-memory per-day leaderboards.

use std::collections::BTreeMap;

use super::record::ScoreRecord;

/// Per-day record lists, each kept sorted ascending by guess count.
///
/// Records with equal guess counts stay in arrival order, which is exactly
/// what appending and then stable-sorting would produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardBook {
    boards: BTreeMap<usize, Vec<ScoreRecord>>,
}

impl LeaderboardBook {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            boards: BTreeMap::new(),
        }
    }

    /// Rebuild from records in log order.
    pub fn replay(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut book = Self::new();
        for record in records {
            book.ingest(record);
        }
        book
    }

    /// Add a record to its day and return its 1-based position.
    ///
    /// No deduplication: a second submission by the same nickname is a
    /// second entry.
    pub fn ingest(&mut self, record: ScoreRecord) -> usize {
        let board = self.boards.entry(record.day).or_default();
        let pos = board.partition_point(|existing| existing.guess_count <= record.guess_count);
        board.insert(pos, record);
        pos + 1
    }

    /// Records for `day`, best first. Empty when nobody has finished it.
    #[must_use]
    pub fn leaderboard(&self, day: usize) -> &[ScoreRecord] {
        self.boards.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn leader(&self, day: usize) -> Option<&ScoreRecord> {
        self.leaderboard(day).first()
    }

    /// Days with at least one record, ascending.
    pub fn days(&self) -> impl Iterator<Item = usize> + '_ {
        self.boards.keys().copied()
    }

    /// Total records across all days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}
