//! Asynchronous export on the tokio runtime
//!
//! Each artifact is written by its own task. The tasks are joined through
//! a `JoinSet`, so every outcome is collected before the report is built.

use std::path::Path;

use ledmx_core::Artifact;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinSet;

use super::{DirectoryExporter, ExportConfig, ExportReport};
use crate::error::Result;

/// Write artifacts into `dir` from within a running tokio runtime
pub async fn export_artifacts_async<P: AsRef<Path>>(
    dir: P,
    artifacts: Vec<Artifact>,
    config: &ExportConfig,
) -> Result<ExportReport> {
    let exporter = DirectoryExporter::open(dir, config)?;
    log::info!(
        "Exporting {} file(s) to {} (async)",
        artifacts.len(),
        exporter.dir().display()
    );
    write_all(&exporter, artifacts).await
}

pub(crate) async fn write_all(
    exporter: &DirectoryExporter,
    artifacts: Vec<Artifact>,
) -> Result<ExportReport> {
    let overwrite = exporter.overwrite();
    let mut tasks = JoinSet::new();

    for (index, artifact) in artifacts.into_iter().enumerate() {
        let path = exporter.path_for(&artifact);
        tasks.spawn(async move {
            let result = write_file(&path, &artifact.bytes, overwrite)
                .await
                .map(|()| path);
            (index, artifact.file_name, result)
        });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined?);
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut report = ExportReport::default();
    for (_, file_name, result) in outcomes {
        report.record(&file_name, result);
    }
    Ok(report)
}

async fn write_file(path: &Path, bytes: &[u8], overwrite: bool) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(overwrite)
        .truncate(overwrite)
        .create_new(!overwrite)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}
