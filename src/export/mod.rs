//! Snapshot export: turns a persona record into a downloadable artifact.
//!
//! The exporter is pure apart from reading the clock: it produces the
//! bytes, a unique suggested filename and a media type. Saving the
//! artifact is the job of a [`crate::sink::DownloadSink`].

pub mod clock;
pub mod snapshot;

pub use clock::{ExportClock, EXPORT_CLOCK};
pub use snapshot::{decode_snapshot, encode_snapshot, SNAPSHOT_EXTENSION, SNAPSHOT_MEDIA_TYPE};

use crate::error::Result;
use crate::persona::PersonaRecord;

/// An encoded snapshot ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested filename, e.g. `persona-1700000000000.json`.
    pub file_name: String,
    pub media_type: &'static str,
    pub contents: String,
}

impl ExportArtifact {
    pub fn bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Build the export artifact for a record.
pub fn export_snapshot(
    record: &PersonaRecord,
    clock: &ExportClock,
    file_prefix: &str,
) -> Result<ExportArtifact> {
    let contents = encode_snapshot(record)?;
    let stamp = clock.next_stamp();

    Ok(ExportArtifact {
        file_name: format!("{}-{}.{}", file_prefix, stamp, SNAPSHOT_EXTENSION),
        media_type: SNAPSHOT_MEDIA_TYPE,
        contents,
    })
}
