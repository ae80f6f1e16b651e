//! Embedding similarity engine.
//!
//! Vector store, nearest-table ranking, and table retention.

pub mod cache;
pub mod ranker;
pub mod vectors;

pub use cache::{CacheStats, TableCache};
pub use ranker::{NearestTable, Neighbor, SimilarityStats, rank};
pub use vectors::{VectorStore, WordVector, cosine_similarity};
