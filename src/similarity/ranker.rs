//! Nearest-table construction.
//!
//! Scores every vocabulary word against a secret and freezes the result into
//! a rank-ordered lookup table. This is the expensive step (one dot product
//! per vocabulary word plus a sort) and runs once per activated puzzle.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use super::vectors::{WordVector, cosine_similarity};

/// Ranks at or below this are reported as "top 10" in summaries.
const TOP_TEN: usize = 10;

/// One ranked vocabulary word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub word: String,
    /// 1-based, 1 = most similar non-secret word
    pub rank: usize,
    pub similarity: f64,
}

/// Similarity landmarks of a nearest table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Similarity of rank 1.
    pub top: f64,
    /// Similarity of rank 10, or of the last rank if the table is shorter.
    pub top10: f64,
    /// Similarity of the last rank.
    pub rest: f64,
}

/// Score and order `vocabulary` against the secret.
///
/// The secret itself (compared case-insensitively) is excluded. Ties keep
/// vocabulary order.
#[must_use]
pub fn rank(secret: &str, secret_vector: &[f32], vocabulary: &[WordVector]) -> Vec<Neighbor> {
    let secret_key = secret.to_lowercase();

    let scored: Vec<Option<(&str, f64)>> = vocabulary
        .par_iter()
        .map(|entry| {
            if entry.word.to_lowercase() == secret_key {
                None
            } else {
                Some((
                    entry.word.as_str(),
                    cosine_similarity(secret_vector, &entry.vector),
                ))
            }
        })
        .collect();

    let mut candidates: Vec<(&str, f64)> = scored.into_iter().flatten().collect();
    // slice::sort_by is stable
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    candidates
        .into_iter()
        .enumerate()
        .map(|(pos, (word, similarity))| Neighbor {
            word: word.to_string(),
            rank: pos + 1,
            similarity,
        })
        .collect()
}

/// Frozen rank/similarity lookup for one puzzle's secret.
#[derive(Debug)]
pub struct NearestTable {
    puzzle: usize,
    cycle: i64,
    secret: String,
    neighbors: Vec<Neighbor>,
    index: HashMap<String, usize>,
}

impl NearestTable {
    /// Wrap ranked neighbors. `neighbors` must be in rank order.
    #[must_use]
    pub fn new(puzzle: usize, cycle: i64, secret: &str, neighbors: Vec<Neighbor>) -> Self {
        let index = neighbors
            .iter()
            .enumerate()
            .map(|(pos, n)| (n.word.to_lowercase(), pos))
            .collect();
        Self {
            puzzle,
            cycle,
            secret: secret.to_string(),
            neighbors,
            index,
        }
    }

    /// Rank the vocabulary and freeze the result.
    #[must_use]
    pub fn build(
        puzzle: usize,
        cycle: i64,
        secret: &str,
        secret_vector: &[f32],
        vocabulary: &[WordVector],
    ) -> Self {
        Self::new(puzzle, cycle, secret, rank(secret, secret_vector, vocabulary))
    }

    /// Case-insensitive O(1) lookup.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&Neighbor> {
        self.index
            .get(&word.to_lowercase())
            .map(|&pos| &self.neighbors[pos])
    }

    /// First `limit` neighbors in rank order.
    #[must_use]
    pub fn top(&self, limit: usize) -> &[Neighbor] {
        &self.neighbors[..limit.min(self.neighbors.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.neighbors.iter()
    }

    #[must_use]
    pub fn stats(&self) -> Option<SimilarityStats> {
        let first = self.neighbors.first()?;
        let last = self.neighbors.last()?;
        let tenth = self.neighbors.get(TOP_TEN - 1).unwrap_or(last);
        Some(SimilarityStats {
            top: first.similarity,
            top10: tenth.similarity,
            rest: last.similarity,
        })
    }

    #[must_use]
    pub const fn puzzle(&self) -> usize {
        self.puzzle
    }

    /// Calendar cycle the table was built for.
    #[must_use]
    pub const fn cycle(&self) -> i64 {
        self.cycle
    }

    /// Secret in its canonical casing.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
