//! JSON-file backed record store.
//!
//! The whole file is a JSON array of record rows. It is read once on open and
//! rewritten after every mutation; a missing file is an empty store. Rewrites go
//! to a sibling `<name>.tmp` file that is then renamed over the store, so a
//! reader never sees a half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use overlap_engine::error::{OverlapError, Result};
use overlap_engine::{AvailabilityRecord, MemoryStore, NewAvailability, RecordId, RecordStore};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: MemoryStore,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| store_error(&path, e))?;
            if raw.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str::<Vec<AvailabilityRecord>>(&raw)
                    .map_err(|e| store_error(&path, e))?
            }
        } else {
            Vec::new()
        };

        tracing::debug!(
            path = %path.display(),
            records = records.len(),
            "opened record store"
        );

        Ok(Self {
            path,
            records: MemoryStore::from_records(records),
        })
    }

    fn save(&self) -> Result<()> {
        let records = self.records.list_availabilities()?;
        let json =
            serde_json::to_string_pretty(&records).map_err(|e| store_error(&self.path, e))?;
        let tmp = temp_path(&self.path);
        fs::write(&tmp, json).map_err(|e| store_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| store_error(&self.path, e))
    }
}

/// `overlap.json` → `overlap.json.tmp`, in the same directory so the rename
/// stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> OverlapError {
    OverlapError::Store(format!("{}: {}", path.display(), err))
}

impl RecordStore for JsonFileStore {
    fn list_availabilities(&self) -> Result<Vec<AvailabilityRecord>> {
        self.records.list_availabilities()
    }

    fn create(&mut self, new: NewAvailability) -> Result<AvailabilityRecord> {
        let record = self.records.create(new)?;
        self.save()?;
        Ok(record)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.records.delete(id)?;
        self.save()
    }
}
