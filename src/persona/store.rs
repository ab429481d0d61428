//! Persona store: the live record for one session.
//!
//! The store owns the only mutable [`PersonaRecord`]. Edits go through
//! [`PersonaStore::apply`]; readers take a [`PersonaStore::snapshot`].

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::export;

use super::types::{FieldEdit, PersonaRecord};

/// Holds the current persona for the lifetime of the process.
#[derive(Debug, Default)]
pub struct PersonaStore {
    record: PersonaRecord,
    edits: usize,
}

impl PersonaStore {
    /// Create a store with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a previously exported record.
    pub fn from_record(record: PersonaRecord) -> Self {
        Self { record, edits: 0 }
    }

    /// Seed a store from a snapshot file on disk.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let record = export::decode_snapshot(&content).map_err(|e| match e {
            Error::SnapshotDecode { source, .. } => Error::SnapshotDecode {
                origin: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;
        info!(path = %path.display(), "Persona snapshot loaded");
        Ok(Self::from_record(record))
    }

    /// Apply one field edit. A rejected edit leaves the record untouched.
    pub fn apply(&mut self, edit: &FieldEdit) -> Result<()> {
        self.record.apply(edit)?;
        self.edits += 1;
        debug!(field = %edit.field, len = edit.value.len(), "Field updated");
        Ok(())
    }

    /// Apply edits in order, stopping at the first rejected one.
    pub fn apply_all<'a>(&mut self, edits: impl IntoIterator<Item = &'a FieldEdit>) -> Result<()> {
        for edit in edits {
            self.apply(edit)?;
        }
        Ok(())
    }

    /// Borrow the live record.
    pub fn record(&self) -> &PersonaRecord {
        &self.record
    }

    /// Point-in-time copy for generation and export.
    pub fn snapshot(&self) -> PersonaRecord {
        self.record.clone()
    }

    /// Number of edits applied since the store was created.
    pub fn edit_count(&self) -> usize {
        self.edits
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
