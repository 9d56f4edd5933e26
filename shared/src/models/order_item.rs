//! Order Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::ItemStatus;

/// Order line item
///
/// `price` is the unit price captured when the item was added; a later menu
/// price change never touches it. Stage timestamps are stamped at most once
/// each and are monotonic: received ≤ cooking_started ≤ cooked ≤ served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price snapshot in currency unit
    pub price: f64,
    pub status: ItemStatus,
    pub received_at: Option<DateTime<Utc>>,
    pub cooking_started_at: Option<DateTime<Utc>>,
    pub cooked_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Order item joined with its product names for detail views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub item: OrderItem,
    pub name_mm: String,
    pub name_en: Option<String>,
}

/// One requested line in an add-items call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub product_id: i64,
    pub quantity: i64,
}

/// Kitchen queue entry: an in-flight item joined up to its table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct KitchenItem {
    pub id: i64,
    pub order_id: i64,
    pub table_number: i64,
    pub quantity: i64,
    pub status: ItemStatus,
    pub name_mm: String,
    pub name_en: Option<String>,
    pub created_at: DateTime<Utc>,
}
