//! Repository Module
//!
//! Read-side queries over the SQLite schema. All lifecycle mutations go
//! through the coordinator in [`crate::lifecycle`], which brackets its
//! multi-step writes in transactions; repositories serve the side-effect-free
//! polling reads.

// Location
pub mod dining_table;

// Menu
pub mod product;

// Orders
pub mod order;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
