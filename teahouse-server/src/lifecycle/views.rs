//! Role dashboard projections
//!
//! Read-only derived queries, re-polled by each role surface every few
//! seconds. Nothing here mutates state, so a redundant poll is always safe.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{CheckoutSummary, KitchenItem, Order, OrderItemDetail};
use shared::status::ItemStatus;

use super::{LifecycleResult, LifecycleService};

/// One order on the waiter's ready-to-serve view, grouped with its
/// DONE/SERVED items
#[derive(Debug, Clone, Serialize)]
pub struct ReadyOrder {
    pub order_id: i64,
    pub table_number: i64,
    pub items: Vec<ReadyOrderItem>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReadyOrderItem {
    pub id: i64,
    pub quantity: i64,
    pub status: ItemStatus,
    pub name_mm: String,
    pub name_en: Option<String>,
    pub cooked_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
struct ReadyRow {
    order_id: i64,
    table_number: i64,
    #[sqlx(flatten)]
    item: ReadyOrderItem,
}

impl LifecycleService {
    /// Kitchen queue: every in-flight item (not yet served) of a live order,
    /// joined with its table number, oldest first.
    pub async fn kitchen_queue(&self) -> LifecycleResult<Vec<KitchenItem>> {
        let items = sqlx::query_as::<_, KitchenItem>(
            "SELECT oi.id, oi.order_id, t.table_number, oi.quantity, oi.status, \
                    p.name_mm, p.name_en, oi.created_at \
             FROM order_items oi \
             JOIN products p ON oi.product_id = p.id \
             JOIN orders o ON oi.order_id = o.id \
             JOIN tables t ON o.table_id = t.id \
             WHERE oi.status IN ('PENDING', 'RECEIVED', 'COOKING', 'DONE') \
               AND o.status NOT IN ('PAID', 'COMPLETED') \
             ORDER BY oi.created_at, oi.id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(items)
    }

    /// Waiter view: live orders that have at least one DONE or SERVED item,
    /// grouped per order.
    pub async fn ready_to_serve(&self) -> LifecycleResult<Vec<ReadyOrder>> {
        let rows = sqlx::query_as::<_, ReadyRow>(
            "SELECT o.id AS order_id, t.table_number, oi.id, oi.quantity, oi.status, \
                    p.name_mm, p.name_en, oi.cooked_at, oi.served_at \
             FROM order_items oi \
             JOIN products p ON oi.product_id = p.id \
             JOIN orders o ON oi.order_id = o.id \
             JOIN tables t ON o.table_id = t.id \
             WHERE oi.status IN ('DONE', 'SERVED') \
               AND o.status NOT IN ('PAID', 'COMPLETED') \
             ORDER BY o.id, oi.cooked_at, oi.id",
        )
        .fetch_all(self.pool())
        .await?;

        let mut orders: Vec<ReadyOrder> = Vec::new();
        for row in rows {
            match orders.last_mut() {
                Some(group) if group.order_id == row.order_id => group.items.push(row.item),
                _ => orders.push(ReadyOrder {
                    order_id: row.order_id,
                    table_number: row.table_number,
                    items: vec![row.item],
                }),
            }
        }
        Ok(orders)
    }

    /// Cashier view: SERVED orders with their items and payment fields.
    pub async fn pending_payment(&self) -> LifecycleResult<Vec<CheckoutSummary>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE status = 'SERVED' ORDER BY created_at, id",
        )
        .fetch_all(self.pool())
        .await?;

        let mut summaries = Vec::with_capacity(orders.len());
        for order in orders {
            let table_number: i64 =
                sqlx::query_scalar("SELECT table_number FROM tables WHERE id = ?")
                    .bind(order.table_id)
                    .fetch_one(self.pool())
                    .await?;
            let items = sqlx::query_as::<_, OrderItemDetail>(
                "SELECT oi.*, p.name_mm, p.name_en \
                 FROM order_items oi \
                 JOIN products p ON oi.product_id = p.id \
                 WHERE oi.order_id = ? \
                 ORDER BY oi.created_at, oi.id",
            )
            .bind(order.id)
            .fetch_all(self.pool())
            .await?;
            summaries.push(CheckoutSummary {
                order,
                table_number,
                items,
            });
        }
        Ok(summaries)
    }
}
