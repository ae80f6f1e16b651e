//! Once-a-day rotation trigger.
//!
//! A tokio task sleeps until the next local midnight of the puzzle timezone,
//! then runs [`PuzzleRotation::rotate`] on the blocking pool. A failed
//! activation is logged and retried at the following midnight.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{Result, SemantleError};
use crate::similarity::NearestTable;

use super::rotation::PuzzleRotation;

pub struct RotationScheduler {
    handle: JoinHandle<()>,
}

impl RotationScheduler {
    /// Start the trigger loop on the current tokio runtime.
    #[must_use]
    pub fn spawn(rotation: Arc<PuzzleRotation>) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                let now = Utc::now();
                let next = rotation.calendar().next_rollover(now);
                let wait = (next - now).to_std().unwrap_or_default();
                debug!(next = %next, wait_secs = wait.as_secs(), "next rotation scheduled");
                tokio::time::sleep(wait).await;

                // Waking early only re-activates yesterday's index (a no-op);
                // the next iteration then sleeps the remainder.
                match fire(Arc::clone(&rotation)).await {
                    Ok(table) => info!(
                        index = table.puzzle(),
                        neighbors = table.len(),
                        "scheduled rotation complete"
                    ),
                    Err(err) => error!(error = %err, "scheduled rotation failed"),
                }
            }
        });
        Self { handle }
    }

    /// Stop the trigger loop.
    pub fn shutdown(self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Run one rotation for the current wall-clock time off the async threads.
pub async fn fire(rotation: Arc<PuzzleRotation>) -> Result<Arc<NearestTable>> {
    let now = Utc::now();
    let index = rotation.current_index(now);
    tokio::task::spawn_blocking(move || rotation.rotate(now))
        .await
        .map_err(|err| SemantleError::ActivationFailure {
            index,
            reason: format!("rotation task panicked: {err}"),
        })?
}
