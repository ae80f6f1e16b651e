//! Puzzle rotation controller.
//!
//! Each puzzle index is either inactive or active with a published nearest
//! table. Activation looks up the index's secret, ranks the vocabulary
//! against it and publishes the finished table in one step; a failed build
//! publishes nothing and leaves the index inactive.
//!
//! Activation is idempotent within a cycle. When the calendar wraps around
//! the catalog, [`PuzzleRotation::rotate`] rebuilds the index for the new
//! cycle and replaces the old table.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{Result, SemantleError};
use crate::similarity::{CacheStats, NearestTable, TableCache, VectorStore};

use super::calendar::{PuzzleCalendar, PuzzlePosition};
use super::catalog::SecretCatalog;

/// Outcome of the boot-time history backfill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub activated: usize,
    pub failed: Vec<usize>,
}

pub struct PuzzleRotation {
    store: Arc<VectorStore>,
    catalog: Arc<SecretCatalog>,
    calendar: PuzzleCalendar,
    tables: TableCache,
    /// Activated index -> cycle its table belongs to
    activated: RwLock<BTreeMap<usize, i64>>,
    /// Serializes table builds so an index is never built twice concurrently
    activation: Mutex<()>,
}

impl PuzzleRotation {
    /// `retained_days` bounds how many tables stay resident; `None` keeps
    /// every activated table.
    #[must_use]
    pub fn new(
        store: Arc<VectorStore>,
        catalog: Arc<SecretCatalog>,
        calendar: PuzzleCalendar,
        retained_days: Option<usize>,
    ) -> Self {
        let capacity = retained_days
            .unwrap_or(calendar.num_secrets())
            .min(calendar.num_secrets());
        Self {
            store,
            catalog,
            calendar,
            tables: TableCache::with_capacity(capacity),
            activated: RwLock::new(BTreeMap::new()),
            activation: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn current_index(&self, now: DateTime<Utc>) -> usize {
        self.calendar.current_index(now)
    }

    #[must_use]
    pub const fn calendar(&self) -> &PuzzleCalendar {
        &self.calendar
    }

    #[must_use]
    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    /// Indices the boot backfill covers: everything before today.
    #[must_use]
    pub fn backfill_range(&self, now: DateTime<Utc>) -> Range<usize> {
        0..self.current_index(now)
    }

    /// Eagerly activate every index before today, in ascending order.
    ///
    /// Today is left for the midnight trigger. Failures are logged and do not
    /// stop the backfill.
    pub fn backfill(&self, now: DateTime<Utc>) -> BackfillReport {
        let PuzzlePosition { index: current, cycle } = self.calendar.position(now);
        info!(current, "backfilling puzzle history");

        let mut report = BackfillReport::default();
        for index in 0..current {
            match self.activate_at(index, cycle) {
                Ok(_) => report.activated += 1,
                Err(err) => {
                    error!(index, error = %err, "backfill activation failed");
                    report.failed.push(index);
                }
            }
        }
        info!(
            activated = report.activated,
            failed = report.failed.len(),
            "backfill complete"
        );
        report
    }

    /// Activate `index` if it is not active yet; otherwise return the
    /// published table unchanged.
    pub fn activate(&self, index: usize) -> Result<Arc<NearestTable>> {
        let cycle = self
            .activated_cycle(index)
            .unwrap_or_else(|| self.calendar.position(Utc::now()).cycle);
        self.activate_at(index, cycle)
    }

    /// Midnight trigger: activate whatever index is current at `now`.
    ///
    /// An index whose table belongs to an earlier cycle is rebuilt.
    pub fn rotate(&self, now: DateTime<Utc>) -> Result<Arc<NearestTable>> {
        let position = self.calendar.position(now);
        info!(
            index = position.index,
            cycle = position.cycle,
            "rotating puzzle"
        );
        self.activate_at(position.index, position.cycle)
    }

    /// Activate `index` for `cycle` unless it is already active for that
    /// cycle or a later one.
    pub fn activate_at(&self, index: usize, cycle: i64) -> Result<Arc<NearestTable>> {
        if let Some(table) = self.resident(index, cycle) {
            return Ok(table);
        }

        let _guard = self.activation.lock();
        if let Some(table) = self.resident(index, cycle) {
            return Ok(table);
        }

        // An evicted table is restored for the cycle it was activated in.
        let build_cycle = match self.activated_cycle(index) {
            Some(existing) if existing >= cycle => existing,
            _ => cycle,
        };
        let table = Arc::new(self.build(index, build_cycle)?);
        self.tables.publish(Arc::clone(&table));
        self.activated.write().insert(index, build_cycle);
        Ok(table)
    }

    fn resident(&self, index: usize, cycle: i64) -> Option<Arc<NearestTable>> {
        let activated = self.activated_cycle(index)?;
        if activated < cycle {
            return None;
        }
        self.tables.get(index)
    }

    fn build(&self, index: usize, cycle: i64) -> Result<NearestTable> {
        let secret = self
            .catalog
            .get(index)
            .ok_or_else(|| SemantleError::ActivationFailure {
                index,
                reason: format!("no secret at index {index}"),
            })?;
        let secret_vector =
            self.store
                .require(secret)
                .map_err(|err| SemantleError::ActivationFailure {
                    index,
                    reason: format!("secret has no embedding ({err})"),
                })?;

        let started = std::time::Instant::now();
        let table = NearestTable::build(
            index,
            cycle,
            secret,
            secret_vector,
            self.store.vocabulary(),
        );
        info!(
            index,
            cycle,
            neighbors = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "activated puzzle"
        );
        Ok(table)
    }

    /// Published table for an active index.
    pub fn table(&self, index: usize) -> Result<Arc<NearestTable>> {
        let Some(cycle) = self.activated_cycle(index) else {
            return Err(SemantleError::PuzzleNotActive(index));
        };
        if let Some(table) = self.tables.get(index) {
            return Ok(table);
        }
        debug!(index, "restoring evicted nearest table");
        self.activate_at(index, cycle)
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.activated.read().contains_key(&index)
    }

    fn activated_cycle(&self, index: usize) -> Option<i64> {
        self.activated.read().get(&index).copied()
    }

    /// Active indices, ascending.
    #[must_use]
    pub fn active_days(&self) -> Vec<usize> {
        self.activated.read().keys().copied().collect()
    }

    /// Secret of an active index, in catalog casing.
    pub fn secret(&self, index: usize) -> Result<&str> {
        if !self.is_active(index) {
            return Err(SemantleError::PuzzleNotActive(index));
        }
        self.catalog
            .get(index)
            .ok_or(SemantleError::PuzzleNotActive(index))
    }

    /// Secret of the puzzle before `today`, if that puzzle is active.
    #[must_use]
    pub fn yesterday(&self, today: usize) -> Option<&str> {
        self.secret(self.calendar.previous(today)).ok()
    }

    #[must_use]
    pub fn resident_tables(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.tables.stats()
    }
}
