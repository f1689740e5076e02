use std::env;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ExportSinkError;

/// Destination for exported study sets.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Write `contents` under `file_name` and return where it landed.
    async fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportSinkError>;
}

/// Writes exports as files into one directory.
#[derive(Clone, Debug)]
pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads `FLASHGEN_EXPORT_DIR`, falling back to the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = env::var("FLASHGEN_EXPORT_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| ".".into());
        Self::new(dir)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ExportSink for DirectoryExportSink {
    async fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportSinkError> {
        let path = self.dir.join(file_name);
        let write_error = |source| ExportSinkError::Write {
            path: path.clone(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(write_error)?;
        tokio::fs::write(&path, contents.as_bytes())
            .await
            .map_err(write_error)?;

        tracing::info!(path = %path.display(), bytes = contents.len(), "study set exported");
        Ok(path)
    }
}
