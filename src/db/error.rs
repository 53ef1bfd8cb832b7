/// Failure opening, creating or writing the insight store
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Storage error: {0}")]
    SqlxError(#[from] sqlx::Error),
}
