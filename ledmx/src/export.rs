//! Artifact export to a target directory
//!
//! Every history entry becomes one headerless `.bin` file. Writes are
//! independent: a failed file is recorded in the [`ExportReport`] and the
//! remaining files are still written. Nothing is rolled back.
//!
//! The parallel and async strategies join every write before returning,
//! so the report is always complete and listed in history order.

pub mod directory;

#[cfg(feature = "async")]
pub mod async_export;

use std::path::{Path, PathBuf};

use ledmx_core::{Artifact, ArtifactSink, GridStore};

use crate::error::{ExportError, Result};

pub use directory::DirectoryExporter;

#[cfg(feature = "async")]
pub use async_export::export_artifacts_async;

/// How the files of one export are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportStrategy {
    /// One file after another, in history order
    #[default]
    Sequential,
    /// Files written concurrently on the rayon pool
    Parallel,
    /// Files written as tokio tasks
    #[cfg(feature = "async")]
    Async,
}

/// Configuration for exporting artifacts
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Write strategy
    pub strategy: ExportStrategy,
    /// Replace files that already exist
    pub overwrite: bool,
    /// Create the target directory when it is missing
    pub create_dir: bool,
}

impl ExportConfig {
    /// Set the write strategy
    pub fn with_strategy(mut self, strategy: ExportStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set whether existing files are replaced
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set whether a missing target directory is created
    pub fn with_create_dir(mut self, create_dir: bool) -> Self {
        self.create_dir = create_dir;
        self
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            strategy: ExportStrategy::Sequential,
            overwrite: true,
            create_dir: false,
        }
    }
}

/// One artifact that could not be written
#[derive(Debug)]
pub struct WriteFailure {
    /// File name of the artifact
    pub file_name: String,
    /// Underlying I/O error
    pub source: std::io::Error,
}

/// Outcome of an export
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Paths written successfully
    pub written: Vec<PathBuf>,
    /// Artifacts that failed
    pub failures: Vec<WriteFailure>,
}

impl ExportReport {
    /// Record the outcome of one write
    pub(crate) fn record(&mut self, file_name: &str, result: std::io::Result<PathBuf>) {
        match result {
            Ok(path) => {
                log::debug!("Wrote {}", path.display());
                self.written.push(path);
            }
            Err(source) => {
                log::error!("Failed to write {file_name}: {source}");
                self.failures.push(WriteFailure {
                    file_name: file_name.to_string(),
                    source,
                });
            }
        }
    }

    /// Total number of artifacts attempted
    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    /// True when every artifact was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn a report with failures into [`ExportError::PartialExport`]
    pub fn into_result(self) -> Result<Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(ExportError::PartialExport {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Write artifacts into `dir` using the configured strategy
///
/// Fails with [`ExportError::UnsupportedEnvironment`] before any write when
/// the target cannot receive files. Per-file failures land in the report.
///
/// [`ExportStrategy::Async`] starts its own runtime and is refused when
/// called from inside one; async callers use [`export_artifacts_async`].
pub fn export_artifacts<P: AsRef<Path>>(
    dir: P,
    artifacts: &[Artifact],
    config: &ExportConfig,
) -> Result<ExportReport> {
    check_runtime(dir.as_ref(), config.strategy)?;

    let exporter = DirectoryExporter::open(dir, config)?;
    log::info!(
        "Exporting {} file(s) to {} ({:?})",
        artifacts.len(),
        exporter.dir().display(),
        config.strategy
    );

    let report = match config.strategy {
        ExportStrategy::Sequential => write_sequential(&exporter, artifacts),
        ExportStrategy::Parallel => write_parallel(&exporter, artifacts),
        #[cfg(feature = "async")]
        ExportStrategy::Async => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async_export::write_all(&exporter, artifacts.to_vec()))?
        }
    };

    log::info!(
        "Export finished: {} written, {} failed",
        report.written.len(),
        report.failures.len()
    );
    Ok(report)
}

#[cfg(feature = "async")]
fn check_runtime(dir: &Path, strategy: ExportStrategy) -> Result<()> {
    if strategy == ExportStrategy::Async && tokio::runtime::Handle::try_current().is_ok() {
        return Err(ExportError::UnsupportedEnvironment {
            path: dir.to_path_buf(),
            reason: "already inside a tokio runtime, use export_artifacts_async".to_string(),
        });
    }
    Ok(())
}

#[cfg(not(feature = "async"))]
fn check_runtime(_dir: &Path, _strategy: ExportStrategy) -> Result<()> {
    Ok(())
}

/// Export every history entry of a store
pub fn export_store<P: AsRef<Path>>(
    store: &GridStore,
    dir: P,
    config: &ExportConfig,
) -> Result<ExportReport> {
    export_artifacts(dir, &store.export()?, config)
}

/// Write one byte sequence to an explicit file path
///
/// Used for single outputs outside a batch; a failure is reported as
/// [`ExportError::WriteFailure`].
pub fn write_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|source| ExportError::WriteFailure {
        file_name: path.display().to_string(),
        source,
    })?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_sequential<S>(sink: &S, artifacts: &[Artifact]) -> ExportReport
where
    S: ArtifactSink<Output = PathBuf, Error = std::io::Error>,
{
    let mut report = ExportReport::default();
    for artifact in artifacts {
        report.record(&artifact.file_name, sink.write_artifact(artifact));
    }
    report
}

fn write_parallel<S>(sink: &S, artifacts: &[Artifact]) -> ExportReport
where
    S: ArtifactSink<Output = PathBuf, Error = std::io::Error> + Sync,
{
    use rayon::prelude::*;

    // collect keeps input order, so the report follows history order
    let results: Vec<_> = artifacts
        .par_iter()
        .map(|artifact| (artifact, sink.write_artifact(artifact)))
        .collect();

    let mut report = ExportReport::default();
    for (artifact, result) in results {
        report.record(&artifact.file_name, result);
    }
    report
}
