//! Append-only JSON Lines log of score records.
//!
//! Each record is one line. A crash mid-append can leave a final line
//! without its newline. Replay skips such a tail only when it does not
//! parse; opening the log for writing either terminates a complete final
//! record or truncates a partial one, so later appends never glue onto it.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, SemantleError};

use super::record::ScoreRecord;

pub struct RecordLog {
    path: PathBuf,
    file: File,
}

impl RecordLog {
    /// Open (creating if needed) the log for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        repair_tail(&path, &mut file)?;
        Ok(Self { path, file })
    }

    /// Durably append one record: written and synced before returning.
    pub fn append(&mut self, record: &ScoreRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)
            .map_err(|err| SemantleError::Serialization(format!("record serialize: {err}")))?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()?;
        debug!(day = record.day, nickname = %record.nickname, "appended record");
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read every record in append order. A missing log is an empty log.
pub fn replay(path: &Path) -> Result<Vec<ScoreRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    let records = parse_records(&raw, &path.display().to_string())?;
    info!(records = records.len(), path = %path.display(), "replayed score log");
    Ok(records)
}

/// Parse log contents. Malformed lines are fatal except for a final line
/// with no terminating newline.
pub fn parse_records(raw: &str, source: &str) -> Result<Vec<ScoreRecord>> {
    let torn_tail_start = if raw.ends_with('\n') {
        None
    } else {
        Some(raw.rfind('\n').map_or(0, |pos| pos + 1))
    };

    let mut records = Vec::new();
    let mut offset = 0usize;
    for (lineno, line) in raw.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += line.len();

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<ScoreRecord>(trimmed) {
            Ok(record) => records.push(record),
            Err(err) if torn_tail_start == Some(start) => {
                warn!(line = lineno + 1, error = %err, "skipping torn final record");
            }
            Err(err) => {
                return Err(SemantleError::Serialization(format!(
                    "{source}:{}: {err}",
                    lineno + 1
                )));
            }
        }
    }
    Ok(records)
}

fn repair_tail(path: &Path, file: &mut File) -> Result<()> {
    let bytes = fs::read(path)?;
    let keep = bytes
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |pos| pos + 1);
    if keep == bytes.len() {
        return Ok(());
    }

    let complete = std::str::from_utf8(&bytes[keep..])
        .ok()
        .map(str::trim)
        .is_some_and(|line| serde_json::from_str::<ScoreRecord>(line).is_ok());
    if complete {
        debug!(path = %path.display(), "terminating final record of score log");
        file.write_all(b"\n")?;
        file.sync_data()?;
    } else {
        warn!(
            path = %path.display(),
            dropped_bytes = bytes.len() - keep,
            "truncating torn tail of score log"
        );
        file.set_len(keep as u64)?;
    }
    Ok(())
}
