//! Sink trait definitions
//!
//! A sink is an external delivery target for generated output. The core
//! never depends on a sink succeeding.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::Result;
use crate::export::ExportArtifact;

/// Receives generated prompt text.
pub trait ClipboardSink {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Place `text` on the clipboard.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Saves an export artifact somewhere the user can retrieve it.
pub trait DownloadSink {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Save the artifact and return where it ended up.
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Send text to a clipboard sink, logging and discarding any failure.
pub fn copy_best_effort(sink: &dyn ClipboardSink, text: &str) {
    match sink.write_text(text) {
        Ok(()) => debug!(sink = sink.name(), bytes = text.len(), "Copied to clipboard"),
        Err(e) => warn!(sink = sink.name(), error = %e.format_for_log(), "Clipboard write failed"),
    }
}
