//! Calendar-export sync ledger -- tracks which appointments the owner has
//! already pushed to an external calendar.
//!
//! This is an explicit injected interface rather than process-global state:
//! whatever component needs "was this appointment exported yet" receives a
//! [`SyncLedger`], and the host application picks the medium (in-memory for
//! tests, a JSON file for the desktop dashboard, browser storage behind its
//! own adapter).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Key-value presence ledger keyed by appointment id.
pub trait SyncLedger {
    fn has(&self, appointment_id: &str) -> bool;
    fn mark(&mut self, appointment_id: &str) -> Result<()>;
    fn unmark(&mut self, appointment_id: &str) -> Result<()>;
}

/// Volatile ledger for tests and previews.
#[derive(Debug, Default)]
pub struct MemorySyncLedger {
    ids: BTreeSet<String>,
}

impl MemorySyncLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SyncLedger for MemorySyncLedger {
    fn has(&self, appointment_id: &str) -> bool {
        self.ids.contains(appointment_id)
    }

    fn mark(&mut self, appointment_id: &str) -> Result<()> {
        self.ids.insert(appointment_id.to_string());
        Ok(())
    }

    fn unmark(&mut self, appointment_id: &str) -> Result<()> {
        self.ids.remove(appointment_id);
        Ok(())
    }
}

/// File-backed ledger: a JSON array of appointment ids, loaded once at open
/// and rewritten on every mutation. Small by construction (one id per
/// exported appointment), so whole-file rewrites are fine.
#[derive(Debug)]
pub struct JsonFileSyncLedger {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl JsonFileSyncLedger {
    /// Open the ledger at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let ids = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<BTreeSet<String>>(&raw)?
        } else {
            BTreeSet::new()
        };
        Ok(Self { path, ids })
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.ids)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SyncLedger for JsonFileSyncLedger {
    fn has(&self, appointment_id: &str) -> bool {
        self.ids.contains(appointment_id)
    }

    fn mark(&mut self, appointment_id: &str) -> Result<()> {
        if self.ids.insert(appointment_id.to_string()) {
            self.persist()?;
        }
        Ok(())
    }

    fn unmark(&mut self, appointment_id: &str) -> Result<()> {
        if self.ids.remove(appointment_id) {
            self.persist()?;
        }
        Ok(())
    }
}
