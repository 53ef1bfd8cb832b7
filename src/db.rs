pub mod error;
pub mod insight_repository;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use insight_repository::InsightRepository;
pub use models::*;
pub use pool::connect;
