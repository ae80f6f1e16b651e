//! Immutable word → embedding store.
//!
//! The store holds the ranking vocabulary first, in snapshot order, followed
//! by any extra words from the wider embedding space. Only the vocabulary is
//! ranked; the extra words are reachable through [`VectorStore::vector_of`]
//! for on-demand similarity.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Result, SemantleError};

/// One vocabulary word and its embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVector {
    /// Word as written in the snapshot.
    pub word: String,
    pub vector: Vec<f32>,
}

/// Read-only vocabulary plus fallback embedding space.
#[derive(Debug, Clone)]
pub struct VectorStore {
    entries: Vec<WordVector>,
    /// Lowercased word -> position in `entries`
    index: HashMap<String, usize>,
    vocabulary_len: usize,
    dim: usize,
}

impl VectorStore {
    /// Build a store from parsed pairs.
    ///
    /// `extra` words already present in the vocabulary are ignored. Every
    /// vector must share one dimension.
    pub fn from_pairs(
        vocabulary: Vec<(String, Vec<f32>)>,
        extra: Vec<(String, Vec<f32>)>,
    ) -> Result<Self> {
        let Some(dim) = vocabulary.first().map(|(_, v)| v.len()) else {
            return Err(SemantleError::Serialization(
                "vocabulary snapshot is empty".to_string(),
            ));
        };

        let mut store = Self {
            entries: Vec::with_capacity(vocabulary.len() + extra.len()),
            index: HashMap::with_capacity(vocabulary.len() + extra.len()),
            vocabulary_len: 0,
            dim,
        };

        for (word, vector) in vocabulary {
            if store.push(word, vector, true)? {
                store.vocabulary_len += 1;
            }
        }
        for (word, vector) in extra {
            store.push(word, vector, false)?;
        }

        Ok(store)
    }

    /// Load the vocabulary snapshot and, optionally, a wider embeddings
    /// snapshot used only for fallback lookups.
    pub fn load(vocabulary_path: &Path, embeddings_path: Option<&Path>) -> Result<Self> {
        let vocabulary = read_word2vec(vocabulary_path)?;
        let extra = match embeddings_path {
            Some(path) => read_word2vec(path)?,
            None => Vec::new(),
        };
        let store = Self::from_pairs(vocabulary, extra)?;
        info!(
            vocabulary = store.vocabulary_len,
            total = store.entries.len(),
            dim = store.dim,
            "loaded vector store"
        );
        Ok(store)
    }

    fn push(&mut self, word: String, vector: Vec<f32>, ranked: bool) -> Result<bool> {
        if vector.len() != self.dim {
            return Err(SemantleError::Serialization(format!(
                "vector for '{word}' has {} dimensions, expected {}",
                vector.len(),
                self.dim
            )));
        }
        let key = word.to_lowercase();
        if self.index.contains_key(&key) {
            if ranked {
                warn!(word = %word, "duplicate word in vocabulary, keeping first");
            } else {
                debug!(word = %word, "embedding already in vocabulary");
            }
            return Ok(false);
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(WordVector { word, vector });
        Ok(true)
    }

    /// Case-insensitive vector lookup. Absence is a normal outcome.
    #[must_use]
    pub fn vector_of(&self, word: &str) -> Option<&[f32]> {
        self.index
            .get(&word.to_lowercase())
            .map(|&idx| self.entries[idx].vector.as_slice())
    }

    /// Same as [`Self::vector_of`] but as an error for `?` call sites.
    pub fn require(&self, word: &str) -> Result<&[f32]> {
        self.vector_of(word)
            .ok_or_else(|| SemantleError::NotFound(word.to_string()))
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&word.to_lowercase())
    }

    /// The ranking vocabulary in snapshot order.
    #[must_use]
    pub fn vocabulary(&self) -> &[WordVector] {
        &self.entries[..self.vocabulary_len]
    }

    #[must_use]
    pub const fn vocabulary_len(&self) -> usize {
        self.vocabulary_len
    }

    /// Vocabulary plus fallback-only words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }
}

/// Cosine similarity accumulated in `f64`.
///
/// Returns 0.0 when either vector has zero magnitude.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

fn read_word2vec(path: &Path) -> Result<Vec<(String, Vec<f32>)>> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        SemantleError::Serialization(format!("read vectors {}: {err}", path.display()))
    })?;
    parse_word2vec(&raw, &path.display().to_string())
}

/// Parse the word2vec text format.
///
/// An optional `<count> <dim>` header is accepted on the first line; blank
/// lines are skipped.
pub fn parse_word2vec(raw: &str, source: &str) -> Result<Vec<(String, Vec<f32>)>> {
    let mut pairs = Vec::new();
    let mut header_dim = None;

    for (lineno, line) in raw.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            continue;
        };
        let rest: Vec<&str> = tokens.collect();

        if lineno == 0 && rest.len() == 1 {
            if let (Ok(_), Ok(dim)) = (word.parse::<usize>(), rest[0].parse::<usize>()) {
                header_dim = Some(dim);
                continue;
            }
        }

        if rest.is_empty() {
            return Err(SemantleError::Serialization(format!(
                "{source}:{}: word '{word}' has no vector",
                lineno + 1
            )));
        }

        let vector = rest
            .iter()
            .map(|token| token.parse::<f32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| {
                SemantleError::Serialization(format!("{source}:{}: {err}", lineno + 1))
            })?;
        if let Some(bad) = vector.iter().find(|value| !value.is_finite()) {
            return Err(SemantleError::Serialization(format!(
                "{source}:{}: non-finite component {bad} in vector for '{word}'",
                lineno + 1
            )));
        }

        if let Some(dim) = header_dim {
            if vector.len() != dim {
                return Err(SemantleError::Serialization(format!(
                    "{source}:{}: expected {dim} dimensions, found {}",
                    lineno + 1,
                    vector.len()
                )));
            }
        }

        pairs.push((word.to_string(), vector));
    }

    Ok(pairs)
}
