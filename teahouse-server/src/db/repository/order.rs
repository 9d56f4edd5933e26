//! Order Repository
//!
//! Read-only access to orders and their items. Mutations (claim, add-items,
//! pipeline transitions, payment) are transactional and live in the
//! lifecycle coordinator.

use super::{RepoError, RepoResult};
use shared::models::{CheckoutSummary, Order, OrderDetail, OrderItemDetail};
use sqlx::SqlitePool;

const ITEM_DETAIL: &str = "\
    SELECT oi.*, p.name_mm, p.name_en \
    FROM order_items oi \
    JOIN products p ON oi.product_id = p.id \
    WHERE oi.order_id = ? \
    ORDER BY oi.created_at, oi.id";

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    /// Items of an order joined with product names
    pub async fn items_of(&self, order_id: i64) -> RepoResult<Vec<OrderItemDetail>> {
        let items = sqlx::query_as::<_, OrderItemDetail>(ITEM_DETAIL)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Order with its items
    pub async fn get_detail(&self, order_id: i64) -> RepoResult<OrderDetail> {
        let order = self
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))?;
        let items = self.items_of(order_id).await?;
        Ok(OrderDetail { order, items })
    }

    /// Checkout summary: order joined up to its table number, with items
    pub async fn get_checkout(&self, order_id: i64) -> RepoResult<CheckoutSummary> {
        let row = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))?;
        let table_number: i64 =
            sqlx::query_scalar("SELECT table_number FROM tables WHERE id = ?")
                .bind(row.table_id)
                .fetch_one(&self.pool)
                .await?;
        let items = self.items_of(order_id).await?;
        Ok(CheckoutSummary {
            order: row,
            table_number,
            items,
        })
    }
}
