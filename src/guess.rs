//! Guess evaluation against an active puzzle.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SemantleError};
use crate::puzzle::PuzzleRotation;
use crate::similarity::cosine_similarity;

/// How a guess placed relative to the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessRank {
    /// The guess is the secret.
    Solved,
    /// Position in the day's nearest table.
    Ranked { rank: usize },
    /// Known word outside the nearest table; ranks past every table entry.
    Beyond { table_size: usize },
}

impl fmt::Display for GuessRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved => write!(f, "solved"),
            Self::Ranked { rank } => write!(f, "{rank}"),
            Self::Beyond { table_size } => write!(f, ">{table_size}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessOutcome {
    pub day: usize,
    /// Lowercased guess, or the secret's canonical spelling when solved.
    pub guess: String,
    pub similarity: f64,
    pub rank: GuessRank,
}

impl GuessOutcome {
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self.rank, GuessRank::Solved)
    }
}

pub struct GuessEvaluator<'a> {
    rotation: &'a PuzzleRotation,
}

impl<'a> GuessEvaluator<'a> {
    #[must_use]
    pub const fn new(rotation: &'a PuzzleRotation) -> Self {
        Self { rotation }
    }

    /// Score `word` against the secret of `day`.
    ///
    /// Table hits are O(1). Words missing from the table but present in the
    /// vector store are scored on demand; words missing from both are
    /// [`SemantleError::UnknownWord`].
    pub fn evaluate(&self, day: usize, word: &str) -> Result<GuessOutcome> {
        let table = self.rotation.table(day)?;
        let guess = word.trim().to_lowercase();
        if guess.is_empty() {
            return Err(SemantleError::UnknownWord(word.to_string()));
        }

        if guess == table.secret().to_lowercase() {
            return Ok(GuessOutcome {
                day,
                guess: table.secret().to_string(),
                similarity: 1.0,
                rank: GuessRank::Solved,
            });
        }

        if let Some(neighbor) = table.get(&guess) {
            return Ok(GuessOutcome {
                day,
                guess,
                similarity: neighbor.similarity,
                rank: GuessRank::Ranked {
                    rank: neighbor.rank,
                },
            });
        }

        let store = self.rotation.store();
        let Some(guess_vector) = store.vector_of(&guess) else {
            return Err(SemantleError::UnknownWord(guess));
        };
        let secret_vector =
            store
                .require(table.secret())
                .map_err(|err| SemantleError::ActivationFailure {
                    index: day,
                    reason: format!("secret has no embedding ({err})"),
                })?;

        Ok(GuessOutcome {
            day,
            similarity: cosine_similarity(secret_vector, guess_vector),
            guess,
            rank: GuessRank::Beyond {
                table_size: table.len(),
            },
        })
    }
}
