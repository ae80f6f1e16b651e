//! Ordered list of secret words, one per puzzle index.

use std::path::Path;

use tracing::info;

use crate::error::{Result, SemantleError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretCatalog {
    secrets: Vec<String>,
}

impl SecretCatalog {
    /// Build from an explicit list. The catalog may not be empty.
    pub fn new(secrets: Vec<String>) -> Result<Self> {
        if secrets.is_empty() {
            return Err(SemantleError::Serialization(
                "secret catalog is empty".to_string(),
            ));
        }
        Ok(Self { secrets })
    }

    /// Parse one secret per line; lines are trimmed and blanks skipped.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Load the catalog, optionally enforcing an exact length.
    pub fn load(path: &Path, expected: Option<usize>) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SemantleError::Serialization(format!("read secrets {}: {err}", path.display()))
        })?;
        let catalog = Self::parse(&raw)?;
        if let Some(expected) = expected {
            if catalog.len() != expected {
                return Err(SemantleError::Config(format!(
                    "{} holds {} secrets, num_secrets is {expected}",
                    path.display(),
                    catalog.len()
                )));
            }
        }
        info!(secrets = catalog.len(), "loaded secret catalog");
        Ok(catalog)
    }

    /// Secret for a puzzle index, in its original casing.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.secrets.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}
