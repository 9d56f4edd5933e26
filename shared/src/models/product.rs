//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
///
/// The coordinator only reads products, to snapshot the unit price when a
/// line item is inserted. Menu management lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    /// Burmese name (primary)
    pub name_mm: String,
    /// English name
    pub name_en: Option<String>,
    /// Current menu price in currency unit
    pub price: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}
