use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::error::{MoodError, MoodResult, StoreOp};
use crate::models::entry::MoodEntry;
use crate::models::user::UserId;

/// Column header of the persisted log, in schema order.
pub const HEADER: &str = "Waktu,Teks,Mood,Emoji,Score";

/// Append-only per-user CSV log under a single data directory.
///
/// Every write builds the new file contents in a temp file in the same
/// directory and atomically renames it over the log, so readers never see a
/// half-written append and a failed write leaves the previous log intact.
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `<data_dir>/history_<user>.csv`
    pub fn log_path(&self, user: &UserId) -> PathBuf {
        self.data_dir.join(format!("history_{}.csv", user))
    }

    /// Durably appends one entry. A missing log is initialized with the
    /// header row first.
    pub fn append(&self, user: &UserId, entry: &MoodEntry) -> MoodResult<()> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| MoodError::storage(StoreOp::Append, e))?;

        let path = self.log_path(user);
        let existing = match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(MoodError::storage(StoreOp::Append, e)),
        };

        let mut tmp = NamedTempFile::new_in(&self.data_dir)
            .map_err(|e| MoodError::storage(StoreOp::Append, e))?;

        // Prior bytes are carried over verbatim, so an append never drops
        // rows, not even ones load_all would skip as malformed.
        match &existing {
            Some(bytes) => {
                tmp.write_all(bytes)
                    .map_err(|e| MoodError::storage(StoreOp::Append, e))?;
                if !bytes.is_empty() && !bytes.ends_with(b"\n") {
                    tmp.write_all(b"\n")
                        .map_err(|e| MoodError::storage(StoreOp::Append, e))?;
                }
            }
            None => {
                tmp.write_all(HEADER.as_bytes())
                    .and_then(|()| tmp.write_all(b"\n"))
                    .map_err(|e| MoodError::storage(StoreOp::Append, e))?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer
            .serialize(entry)
            .map_err(|e| MoodError::storage(StoreOp::Append, e))?;
        writer
            .flush()
            .map_err(|e| MoodError::storage(StoreOp::Append, e))?;
        drop(writer);

        tmp.as_file()
            .sync_all()
            .map_err(|e| MoodError::storage(StoreOp::Append, e))?;
        tmp.persist(&path)
            .map_err(|e| MoodError::storage(StoreOp::Append, e.error))?;
        Ok(())
    }

    /// Loads every parseable entry. A missing log is an empty log, not an
    /// error. Malformed rows (bad timestamp or score, label outside the
    /// set) are skipped with a warning; the rest of the log still loads.
    pub fn load_all(&self, user: &UserId) -> MoodResult<Vec<MoodEntry>> {
        let path = self.log_path(user);
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MoodError::storage(StoreOp::Load, e)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut entries = Vec::new();
        for (idx, record) in reader.deserialize::<MoodEntry>().enumerate() {
            match record {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    // Header is line 1, first record line 2.
                    tracing::warn!(
                        user = %user,
                        line = idx + 2,
                        error = %e,
                        "Skipping malformed history row"
                    );
                }
            }
        }
        Ok(entries)
    }

    /// Irrecoverably discards the user's log. Resetting a log that never
    /// existed is a success.
    pub fn reset(&self, user: &UserId) -> MoodResult<()> {
        let path = self.log_path(user);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(user = %user, "History reset");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MoodError::storage(StoreOp::Reset, e)),
        }
    }

    /// Returns the stored log byte-for-byte, without re-serializing. A
    /// missing log exports as the bare header.
    pub fn export_raw(&self, user: &UserId) -> MoodResult<String> {
        let path = self.log_path(user);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(format!("{}\n", HEADER)),
            Err(e) => Err(MoodError::storage(StoreOp::Export, e)),
        }
    }
}
