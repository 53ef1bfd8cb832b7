#![allow(dead_code)]

use insight_search::db;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FULL_HEADER: &str =
    "Modifier Type,Modifier,Suggestion,Language,Region,Keyword,Search Volume,Cost Per Click";

/// Throwaway SQLite database; the directory is removed when dropped
pub struct TestStore {
    pub dir: TempDir,
    pub pool: SqlitePool,
}

impl TestStore {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn database_url(dir: &Path) -> String {
    format!("sqlite://{}", dir.join("insights.db").display())
}

/// Get a fresh store backed by a file in a temp directory
pub async fn test_store() -> TestStore {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = db::connect(&database_url(dir.path()))
        .await
        .expect("Failed to open test database");

    TestStore { dir, pool }
}

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write CSV fixture");
    path
}

/// CSV with the full header and `rows` generated data rows
pub fn write_generated_csv(dir: &Path, name: &str, rows: usize) -> PathBuf {
    let mut contents = String::from(FULL_HEADER);
    contents.push('\n');
    for i in 0..rows {
        contents.push_str(&format!(
            "Questions,how,how to {i},English,United States,speaker,{},{}\n",
            100 * (i + 1),
            0.25 * (i as f64 + 1.0)
        ));
    }
    write_csv(dir, name, &contents)
}
