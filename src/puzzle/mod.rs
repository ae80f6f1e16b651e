//! Daily puzzle rotation.
//!
//! Maps calendar days onto the secret catalog and materializes each day's
//! nearest table on activation.

pub mod calendar;
pub mod catalog;
pub mod rotation;
pub mod scheduler;

pub use calendar::{PuzzleCalendar, PuzzlePosition};
pub use catalog::SecretCatalog;
pub use rotation::{BackfillReport, PuzzleRotation};
pub use scheduler::RotationScheduler;
