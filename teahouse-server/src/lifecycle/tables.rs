//! Table claim and release
//!
//! Claiming is idempotent: two customers scanning the same table's code get
//! the same open order. The existence check, the order insert and the table
//! flip happen in one transaction; the partial unique index on active orders
//! backstops any claim that still manages to race.

use chrono::Utc;
use shared::models::{DiningTable, Order};
use shared::status::{OrderStatus, TableStatus};
use tracing::info;

use super::{LifecycleError, LifecycleResult, LifecycleService};

impl LifecycleService {
    /// Claim a table: return its open order, creating one if none exists.
    pub async fn claim_table(&self, table_id: i64) -> LifecycleResult<Order> {
        // A claim that loses the insert race re-reads the winner's order.
        match self.try_claim(table_id).await {
            Err(LifecycleError::Conflict(_)) => self.try_claim(table_id).await,
            other => other,
        }
    }

    async fn try_claim(&self, table_id: i64) -> LifecycleResult<Order> {
        let mut tx = self.write_tx().await?;

        let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM tables WHERE id = ?")
            .bind(table_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(format!("Table {table_id}")))?;

        if let Some(order) = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE table_id = ? AND status NOT IN ('PAID', 'COMPLETED')",
        )
        .bind(table_id)
        .fetch_optional(&mut *tx)
        .await?
        {
            // Idempotent claim: hand back the already-open order untouched
            tx.commit().await?;
            return Ok(order);
        }

        let inserted = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (table_id, status, total_amount, payment_verified, created_at) \
             VALUES (?, ?, 0, 0, ?) RETURNING *",
        )
        .bind(table_id)
        .bind(OrderStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await;

        let order = match inserted {
            Ok(order) => order,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(LifecycleError::Conflict(format!(
                    "Table {table_id} was claimed concurrently"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if table.status != TableStatus::Occupied {
            sqlx::query("UPDATE tables SET status = ? WHERE id = ?")
                .bind(TableStatus::Occupied)
                .bind(table_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(table_id, order_id = order.id, "table claimed, order opened");
        Ok(order)
    }

    /// Free a table after physical cleanup.
    ///
    /// Rejected while a non-terminal order still references the table; the
    /// waiter settles (or completes) the order first.
    pub async fn clean_table(&self, table_id: i64) -> LifecycleResult<DiningTable> {
        let mut tx = self.write_tx().await?;

        let active: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM orders WHERE table_id = ? AND status NOT IN ('PAID', 'COMPLETED')",
        )
        .bind(table_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(order_id) = active {
            return Err(LifecycleError::InvalidTransition(format!(
                "Table {table_id} still has active order {order_id}"
            )));
        }

        let table = sqlx::query_as::<_, DiningTable>(
            "UPDATE tables SET status = ? WHERE id = ? RETURNING *",
        )
        .bind(TableStatus::Free)
        .bind(table_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Table {table_id}")))?;

        tx.commit().await?;
        info!(table_id, "table cleaned and freed");
        Ok(table)
    }
}
