//! Item preparation pipeline
//!
//! PENDING → RECEIVED → COOKING → DONE → SERVED, each step stamping its
//! timestamp exactly once. A step whose item is not in the expected
//! predecessor state is rejected, never fixed forward.
//!
//! Serving is the one place a lower-level transition cascades upward: after
//! the stamp, the sibling items are re-read inside the same transaction and
//! the order is promoted to SERVED when none remain unserved. The fresh read
//! plus the status guard on the UPDATE make the promotion happen exactly
//! once even when the last two items are served concurrently.

use chrono::Utc;
use shared::models::OrderItem;
use shared::status::{ItemStatus, OrderStatus};
use sqlx::{Sqlite, Transaction};
use tracing::info;

use super::{LifecycleError, LifecycleResult, LifecycleService};

impl LifecycleService {
    /// Kitchen acknowledgment: PENDING → RECEIVED
    pub async fn receive_item(&self, item_id: i64) -> LifecycleResult<OrderItem> {
        self.advance_item(item_id, ItemStatus::Received, "received_at")
            .await
    }

    /// RECEIVED → COOKING
    pub async fn start_cooking(&self, item_id: i64) -> LifecycleResult<OrderItem> {
        self.advance_item(item_id, ItemStatus::Cooking, "cooking_started_at")
            .await
    }

    /// COOKING → DONE; the item surfaces on the waiter's ready view
    pub async fn mark_done(&self, item_id: i64) -> LifecycleResult<OrderItem> {
        self.advance_item(item_id, ItemStatus::Done, "cooked_at").await
    }

    /// DONE → SERVED, then evaluate the order promotion rule
    pub async fn serve_item(&self, item_id: i64) -> LifecycleResult<OrderItem> {
        let mut tx = self.write_tx().await?;
        let item = advance_in_tx(&mut tx, item_id, ItemStatus::Served, "served_at").await?;

        // Fresh read of all sibling items, not cached state: a concurrent
        // serve that committed first is visible here.
        let unserved: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM order_items WHERE order_id = ? AND status != 'SERVED'",
        )
        .bind(item.order_id)
        .fetch_one(&mut *tx)
        .await?;

        if unserved == 0 {
            let promoted = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND status = ?")
                .bind(OrderStatus::Served)
                .bind(item.order_id)
                .bind(OrderStatus::Pending)
                .execute(&mut *tx)
                .await?;
            if promoted.rows_affected() > 0 {
                info!(order_id = item.order_id, "all items served, order promoted");
            }
        }

        tx.commit().await?;
        Ok(item)
    }

    async fn advance_item(
        &self,
        item_id: i64,
        to: ItemStatus,
        stamp_column: &'static str,
    ) -> LifecycleResult<OrderItem> {
        let mut tx = self.write_tx().await?;
        let item = advance_in_tx(&mut tx, item_id, to, stamp_column).await?;
        tx.commit().await?;
        Ok(item)
    }
}

async fn advance_in_tx(
    tx: &mut Transaction<'static, Sqlite>,
    item_id: i64,
    to: ItemStatus,
    stamp_column: &'static str,
) -> LifecycleResult<OrderItem> {
    let item = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE id = ?")
        .bind(item_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Order item {item_id}")))?;

    let from = item.status;
    from.advance(to)?;

    // Predecessor guard on the UPDATE: a transition that raced us between
    // the read above and this write touches zero rows instead of
    // double-applying.
    let sql = format!(
        "UPDATE order_items SET status = ?, {stamp_column} = ? WHERE id = ? AND status = ? RETURNING *"
    );
    let updated = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(to)
        .bind(Utc::now())
        .bind(item_id)
        .bind(from)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            LifecycleError::Conflict(format!("Order item {item_id} transitioned concurrently"))
        })?;

    Ok(updated)
}
