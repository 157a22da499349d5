//! Delivery of rendered exports.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::error::{ExportError, Result};
use crate::request::ExportArtifact;

/// Destination for rendered export artifacts.
pub trait OutputSink: Send + Sync {
    /// Deliver an artifact, returning where it ended up.
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Writes artifacts as files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir`. The directory is created on first delivery.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for DirectorySink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        let io_err = |path: &Path| {
            let path = path.display().to_string();
            move |source| ExportError::Io { path, source }
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        let path = self.dir.join(&artifact.filename);
        std::fs::write(&path, artifact.contents.as_bytes()).map_err(io_err(&path))?;

        info!(
            path = %path.display(),
            bytes = artifact.contents.len(),
            "Wrote export"
        );
        Ok(path)
    }
}

/// Keeps delivered artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<ExportArtifact>>,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts delivered so far, oldest first
    #[must_use]
    pub fn artifacts(&self) -> Vec<ExportArtifact> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputSink for MemorySink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(artifact.clone());
        Ok(PathBuf::from(&artifact.filename))
    }
}
