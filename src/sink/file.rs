//! Download sink that writes artifacts into a directory.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::export::ExportArtifact;

use super::traits::DownloadSink;

/// Writes `<dir>/<file_name>`, never replacing an existing file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| Error::IoWrite {
                path: self.dir.clone(),
                source: e,
            })?;
            debug!(path = %self.dir.display(), "Created export directory");
        }
        Ok(())
    }
}

impl DownloadSink for DirectorySink {
    fn name(&self) -> &str {
        "directory"
    }

    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        self.ensure_dir()?;

        let path = self.dir.join(&artifact.file_name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::ExportExists { path: path.clone() },
                _ => Error::IoWrite {
                    path: path.clone(),
                    source: e,
                },
            })?;

        file.write_all(artifact.bytes()).map_err(|e| Error::IoWrite {
            path: path.clone(),
            source: e,
        })?;

        info!(
            path = %path.display(),
            media_type = artifact.media_type,
            bytes = artifact.bytes().len(),
            "Persona exported"
        );
        Ok(path)
    }
}
