//! semantle - daily word-similarity puzzle engine
//!
//! A fixed word-embedding vocabulary, a catalog of secret words rotated once
//! per local day, precomputed nearest-neighbor tables per puzzle and
//! append-only leaderboards of finished games.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod guess;
pub mod leaderboard;
pub mod puzzle;
pub mod similarity;
pub mod test_utils;

pub use error::{Result, SemantleError};
