use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::db::DbError;

/// Open (creating if missing) the SQLite database behind `database_url`.
///
/// The importer is a single writer, so one connection is enough.
#[instrument]
pub async fn connect(database_url: &str) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    debug!("Connected to {}", database_url);
    Ok(pool)
}
