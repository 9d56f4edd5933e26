//! Lifecycle Coordinator
//!
//! Keeps table occupancy, order status and item preparation status mutually
//! consistent while four role surfaces (customer, kitchen, waiter, cashier)
//! poll and mutate the same rows. Every multi-step operation runs inside a
//! single SQLite transaction; nothing here holds state across requests.
//!
//! - **tables**: claim-or-reuse and clean
//! - **ledger**: add items (price snapshot + total recompute), payment
//! - **pipeline**: forward-only item transitions and the serve → order
//!   promotion rule
//! - **views**: read-only projections for the polling dashboards

pub mod ledger;
pub mod pipeline;
pub mod tables;
pub mod views;

pub use views::{ReadyOrder, ReadyOrderItem};

use shared::status::TransitionError;
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;

/// Coordinator error taxonomy
///
/// Every operation aborts on the first error; the enclosing transaction
/// rolls back on drop, so no partial state is ever visible.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<TransitionError> for LifecycleError {
    fn from(err: TransitionError) -> Self {
        LifecycleError::InvalidTransition(err.to_string())
    }
}

/// Result type for coordinator operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// The orchestration layer. Holds only the injected pool; one transaction
/// per operation, acquired on entry and released on every exit path.
#[derive(Clone)]
pub struct LifecycleService {
    pool: SqlitePool,
}

impl LifecycleService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a write transaction.
    ///
    /// The pool holds a single connection, so racing writers queue at
    /// acquire and each transaction starts on a snapshot that includes every
    /// previously committed write.
    pub(crate) async fn write_tx(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }
}
