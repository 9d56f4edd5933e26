//! Dining Table Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::TableStatus;

/// Dining table entity
///
/// Created at setup time and never destroyed; only `status` is mutated by
/// the lifecycle coordinator. At most one active (non-terminal) order may
/// reference a table at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    /// Human-facing table number, unique across the restaurant
    pub table_number: i64,
    pub status: TableStatus,
    /// Scannable identifier printed on the table (generation is external)
    pub qr_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Table joined with its active order for the floor overview
///
/// `current_bill` is zero when the table has no active order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableWithBill {
    pub id: i64,
    pub table_number: i64,
    pub status: TableStatus,
    pub current_bill: f64,
    pub order_id: Option<i64>,
}
