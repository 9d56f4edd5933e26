//! Order ledger: items and payment
//!
//! `total_amount` is never adjusted incrementally; after each insert batch it
//! is recomputed as a fresh SUM over the order's items inside the same
//! transaction, so the invariant `total == Σ(quantity × price)` holds at
//! every commit point.

use chrono::Utc;
use shared::models::{CartItemInput, Order, OrderItem, PaymentSubmission};
use shared::status::{ItemStatus, OrderStatus, TableStatus};
use tracing::info;

use super::{LifecycleError, LifecycleResult, LifecycleService};

impl LifecycleService {
    /// Add line items to an open order, all-or-nothing.
    ///
    /// Each line snapshots the product's current price at insert time; later
    /// menu changes never touch existing items. An unknown product aborts the
    /// whole call with nothing inserted and the total untouched.
    pub async fn add_items(
        &self,
        order_id: i64,
        items: Vec<CartItemInput>,
    ) -> LifecycleResult<Vec<OrderItem>> {
        if items.is_empty() {
            return Err(LifecycleError::Validation("No items to add".into()));
        }

        let mut tx = self.write_tx().await?;

        let order = fetch_order(&mut tx, order_id).await?;
        if order.status.is_terminal() {
            return Err(LifecycleError::InvalidTransition(format!(
                "Order {order_id} is {} and accepts no items",
                order.status.as_str()
            )));
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(items.len());
        for line in &items {
            if line.quantity < 1 {
                return Err(LifecycleError::Validation(format!(
                    "Quantity must be at least 1 (got {})",
                    line.quantity
                )));
            }

            let price: Option<f64> = sqlx::query_scalar("SELECT price FROM products WHERE id = ?")
                .bind(line.product_id)
                .fetch_optional(&mut *tx)
                .await?;
            let price =
                price.ok_or_else(|| LifecycleError::NotFound(format!("Product {}", line.product_id)))?;

            let item = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (order_id, product_id, quantity, price, status, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(price)
            .bind(ItemStatus::Pending)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
            created.push(item);
        }

        sqlx::query(
            "UPDATE orders SET total_amount = \
                 (SELECT COALESCE(SUM(quantity * price), 0) FROM order_items WHERE order_id = ?) \
             WHERE id = ?",
        )
        .bind(order_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(order_id, count = created.len(), "items added, total recomputed");
        Ok(created)
    }

    /// Record the customer's declared payment method.
    ///
    /// A declaration of intent, not a settlement: status does not change
    /// until the cashier verifies. Non-cash methods must carry a slip.
    pub async fn submit_payment(
        &self,
        order_id: i64,
        submission: PaymentSubmission,
    ) -> LifecycleResult<Order> {
        let method = submission.payment_method;
        let slip = match submission.payment_slip {
            Some(slip) if !slip.trim().is_empty() => Some(slip),
            _ => None,
        };
        if method.requires_slip() && slip.is_none() {
            return Err(LifecycleError::Validation(format!(
                "Payment slip is required for {}",
                method.as_str()
            )));
        }
        // Cash is settled in person, any stray slip is dropped
        let slip = if method.requires_slip() { slip } else { None };

        let mut tx = self.write_tx().await?;

        let order = fetch_order(&mut tx, order_id).await?;
        if order.status.is_terminal() {
            return Err(LifecycleError::InvalidTransition(format!(
                "Order {order_id} is already {}",
                order.status.as_str()
            )));
        }

        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET payment_method = ?, payment_slip = ? WHERE id = ? RETURNING *",
        )
        .bind(method)
        .bind(slip)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(order_id, method = method.as_str(), "payment submitted");
        Ok(order)
    }

    /// Cashier settlement: SERVED → PAID, stamps completion time.
    ///
    /// Does not free the table; physical cleanup is a separate waiter
    /// action.
    pub async fn verify_payment(&self, order_id: i64) -> LifecycleResult<Order> {
        let mut tx = self.write_tx().await?;

        let order = fetch_order(&mut tx, order_id).await?;
        order.status.advance(OrderStatus::Paid)?;
        if order.payment_method.is_none() {
            return Err(LifecycleError::InvalidTransition(format!(
                "Order {order_id} has no submitted payment to verify"
            )));
        }

        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = ?, payment_verified = 1, completed_at = ? \
             WHERE id = ? AND status = ? RETURNING *",
        )
        .bind(OrderStatus::Paid)
        .bind(Utc::now())
        .bind(order_id)
        .bind(OrderStatus::Served)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            LifecycleError::Conflict(format!("Order {order_id} was settled concurrently"))
        })?;

        tx.commit().await?;
        info!(order_id, "payment verified, order paid");
        Ok(order)
    }

    /// Simplified flow: close the order and free its table in one
    /// transaction, skipping payment verification.
    pub async fn complete_order(&self, order_id: i64) -> LifecycleResult<Order> {
        let mut tx = self.write_tx().await?;

        let order = fetch_order(&mut tx, order_id).await?;
        order.status.advance(OrderStatus::Completed)?;

        let completed = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = ?, completed_at = ? \
             WHERE id = ? AND status = ? RETURNING *",
        )
        .bind(OrderStatus::Completed)
        .bind(Utc::now())
        .bind(order_id)
        .bind(order.status)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            LifecycleError::Conflict(format!("Order {order_id} was settled concurrently"))
        })?;

        sqlx::query("UPDATE tables SET status = ? WHERE id = ?")
            .bind(TableStatus::Free)
            .bind(completed.table_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(order_id, table_id = completed.table_id, "order completed, table freed");
        Ok(completed)
    }
}

async fn fetch_order(
    tx: &mut sqlx::Transaction<'static, sqlx::Sqlite>,
    order_id: i64,
) -> LifecycleResult<Order> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Order {order_id}")))
}
