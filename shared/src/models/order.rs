//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::OrderItemDetail;
use crate::status::{OrderStatus, PaymentMethod};

/// Order entity
///
/// Created when a table is claimed, retained forever as history.
/// `total_amount` always equals the sum of `quantity * price` over the
/// order's items; it is recomputed inside the same transaction as any
/// item insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub status: OrderStatus,
    /// Total amount in currency unit
    pub total_amount: f64,
    pub payment_method: Option<PaymentMethod>,
    /// Evidence reference for non-cash payments (transfer slip)
    pub payment_slip: Option<String>,
    pub payment_verified: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Order with its line items, as returned by the order detail endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// Checkout summary: order joined up to its table number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSummary {
    #[serde(flatten)]
    pub order: Order,
    pub table_number: i64,
    pub items: Vec<OrderItemDetail>,
}

/// Payment declaration submitted by the customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSubmission {
    pub payment_method: PaymentMethod,
    pub payment_slip: Option<String>,
}
