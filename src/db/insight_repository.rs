use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use crate::db::{DbError, FileSourceCount, InsightRecord};
use crate::importers::SourceRow;

#[derive(Clone)]
pub struct InsightRepository {
    pool: SqlitePool,
}

impl InsightRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `insight_search` table if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), DbError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS insight_search (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                file_source TEXT,
                modifier_type TEXT,
                modifier TEXT,
                suggestion TEXT,
                language TEXT,
                region TEXT,
                keyword TEXT,
                search_volume INTEGER,
                cost_per_click REAL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("insight_search table ready");
        Ok(())
    }

    /// Insert rows in a single transaction; nothing is kept if any insert fails
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub async fn insert_rows(&self, rows: &[SourceRow]) -> Result<usize, DbError> {
        debug!("Beginning transaction to insert {} rows", rows.len());
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for row in rows {
            let result = sqlx::query(
                r#"
                INSERT INTO insight_search (
                    file_source, modifier_type, modifier, suggestion,
                    language, region, keyword, search_volume, cost_per_click
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&row.file_source)
            .bind(&row.modifier_type)
            .bind(&row.modifier)
            .bind(&row.suggestion)
            .bind(&row.language)
            .bind(&row.region)
            .bind(&row.keyword)
            .bind(row.search_volume)
            .bind(row.cost_per_click)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        info!("Inserted {} insight rows", inserted);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM insight_search")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self))]
    pub async fn count_by_file_source(&self) -> Result<Vec<FileSourceCount>, DbError> {
        let counts = sqlx::query_as::<_, FileSourceCount>(
            r#"
            SELECT file_source, COUNT(*) AS count
            FROM insight_search
            GROUP BY file_source
            ORDER BY file_source
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} distinct file sources", counts.len());
        Ok(counts)
    }

    #[instrument(skip(self), fields(file_source = %file_source))]
    pub async fn find_by_file_source(
        &self,
        file_source: &str,
    ) -> Result<Vec<InsightRecord>, DbError> {
        let records = sqlx::query_as::<_, InsightRecord>(
            r#"
            SELECT id, file_source, modifier_type, modifier, suggestion,
                   language, region, keyword, search_volume, cost_per_click
            FROM insight_search
            WHERE file_source = ?
            ORDER BY id
            "#,
        )
        .bind(file_source)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} records", records.len());
        Ok(records)
    }
}
