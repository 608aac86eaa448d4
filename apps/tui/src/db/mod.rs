pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;

use std::path::PathBuf;
use thiserror::Error;

pub use migrations::{create_database_pool, create_memory_pool, setup_database};
pub use models::LocationFilterParams;
pub use seed::seed_demo_data;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("database directory is not writable: {}", .0.display())]
    NotWritable(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
