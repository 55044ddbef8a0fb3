//! Filesystem directory as an artifact sink

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use ledmx_core::{Artifact, ArtifactSink};

use super::ExportConfig;
use crate::error::{ExportError, Result};

/// Writes artifacts as files inside one directory
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryExporter {
    /// Open a target directory, checking it can receive files
    ///
    /// Missing directories are created only when `config.create_dir` is set.
    pub fn open<P: AsRef<Path>>(dir: P, config: &ExportConfig) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let unsupported = |reason: String| ExportError::UnsupportedEnvironment {
            path: dir.clone(),
            reason,
        };

        match fs::metadata(&dir) {
            Ok(metadata) if !metadata.is_dir() => {
                return Err(unsupported("not a directory".to_string()));
            }
            Ok(metadata) if metadata.permissions().readonly() => {
                return Err(unsupported("directory is read-only".to_string()));
            }
            Ok(_) => {}
            Err(error) if error.kind() == ErrorKind::NotFound && config.create_dir => {
                log::info!("Creating export directory {}", dir.display());
                fs::create_dir_all(&dir).map_err(|e| unsupported(e.to_string()))?;
            }
            Err(error) => return Err(unsupported(error.to_string())),
        }

        Ok(Self {
            dir,
            overwrite: config.overwrite,
        })
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether existing files are replaced
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Path an artifact is written to
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        self.dir.join(&artifact.file_name)
    }
}

impl ArtifactSink for DirectoryExporter {
    type Output = PathBuf;
    type Error = std::io::Error;

    fn write_artifact(&self, artifact: &Artifact) -> std::io::Result<PathBuf> {
        let path = self.path_for(artifact);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(self.overwrite)
            .truncate(self.overwrite)
            .create_new(!self.overwrite)
            .open(&path)?;
        file.write_all(&artifact.bytes)?;
        file.flush()?;
        Ok(path)
    }
}
