use serde::Serialize;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, FileSourceCount, InsightRepository};
use crate::importers::csv_importer::{CsvImportError, CsvImporter};

/// Error types for insight import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse failed: {0}")]
    Parse(#[source] CsvImportError),

    #[error(transparent)]
    Storage(#[from] DbError),

    #[error("CSV reader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<CsvImportError> for ImportError {
    fn from(err: CsvImportError) -> Self {
        match err {
            CsvImportError::Open { path, source } => ImportError::Io { path, source },
            other => ImportError::Parse(other),
        }
    }
}

/// What happened to one candidate file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Imported { rows: usize },
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileImport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Result of a batch run over the candidate list
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub files: Vec<FileImport>,
    pub imported_this_run: usize,
    /// Rows in the destination table, including earlier runs
    pub total_records: i64,
    pub per_file: Vec<FileSourceCount>,
}

impl ImportSummary {
    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Skipped)
            .map(|f| f.path.as_path())
    }

    pub fn count_for(&self, file_source: &str) -> Option<i64> {
        self.per_file
            .iter()
            .find(|c| c.file_source == file_source)
            .map(|c| c.count)
    }
}

/// Service loading keyword insight CSV exports into the `insight_search` table
#[derive(Clone)]
pub struct InsightImportService {
    repo: InsightRepository,
}

impl InsightImportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: InsightRepository::new(pool),
        }
    }

    pub fn repository(&self) -> &InsightRepository {
        &self.repo
    }

    pub async fn ensure_schema(&self) -> Result<(), ImportError> {
        self.repo.ensure_schema().await?;
        info!("insight_search table created (or already present)");
        Ok(())
    }

    /// Import one CSV file. All of its rows are committed together or not at all.
    #[instrument(skip(self))]
    pub async fn import_file(&self, path: &Path) -> Result<usize, ImportError> {
        let start_time = Instant::now();
        let importer = CsvImporter::new(path);

        let rows = tokio::task::spawn_blocking(move || importer.read_rows()).await??;

        let inserted = self.repo.insert_rows(&rows).await?;
        debug!(
            "Imported {} rows from {:?} in {:.2}s",
            inserted,
            path,
            start_time.elapsed().as_secs_f64()
        );
        Ok(inserted)
    }

    /// Import each candidate that exists, in order; missing files are skipped.
    ///
    /// Any other failure stops the run. Files already imported stay committed.
    #[instrument(skip(self, paths), fields(candidates = paths.len()))]
    pub async fn import_all(&self, paths: &[PathBuf]) -> Result<ImportSummary, ImportError> {
        let mut files = Vec::with_capacity(paths.len());
        let mut imported_this_run = 0;

        for path in paths {
            if !path.exists() {
                warn!("File not found, skipping: {:?}", path);
                files.push(FileImport {
                    path: path.clone(),
                    outcome: FileOutcome::Skipped,
                });
                continue;
            }

            info!("Importing {:?}...", path);
            let rows = self.import_file(path).await?;
            info!("Imported {:?}: {} rows", path, rows);

            imported_this_run += rows;
            files.push(FileImport {
                path: path.clone(),
                outcome: FileOutcome::Imported { rows },
            });
        }

        let total_records = self.repo.count().await?;
        let per_file = self.repo.count_by_file_source().await?;

        info!(
            "Import finished: {} rows this run, {} records in total",
            imported_this_run, total_records
        );

        Ok(ImportSummary {
            files,
            imported_this_run,
            total_records,
            per_file,
        })
    }
}
