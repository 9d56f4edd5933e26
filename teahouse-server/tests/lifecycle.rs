//! Lifecycle coordinator integration tests
//!
//! Drives `LifecycleService` against a real SQLite file (tempdir), covering
//! the cross-entity invariants: claim idempotence, atomic item insertion
//! with total recompute, the forward-only item pipeline, the serve → order
//! promotion, and payment settlement.

use chrono::Utc;
use shared::models::{CartItemInput, DiningTable, Order, OrderItem, PaymentSubmission};
use shared::status::{ItemStatus, OrderStatus, PaymentMethod, TableStatus};
use sqlx::SqlitePool;
use teahouse_server::lifecycle::{LifecycleError, LifecycleService};
use teahouse_server::DbService;
use tempfile::TempDir;

/// Three tables (numbers 1..3) and two products:
/// 1 = tea @ 500, 2 = mohinga @ 1200
async fn setup() -> (TempDir, LifecycleService) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pos.db");
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();
    seed(&db.pool).await;
    let service = LifecycleService::new(db.pool.clone());
    (dir, service)
}

async fn seed(pool: &SqlitePool) {
    let now = Utc::now();
    for number in 1..=3 {
        sqlx::query("INSERT INTO tables (table_number, status, created_at) VALUES (?, 'FREE', ?)")
            .bind(number as i64)
            .bind(now)
            .execute(pool)
            .await
            .unwrap();
    }
    for (id, name_mm, name_en, price) in [
        (1i64, "လက်ဖက်ရည်", "Tea", 500.0),
        (2i64, "မုန့်ဟင်းခါး", "Mohinga", 1200.0),
    ] {
        sqlx::query(
            "INSERT INTO products (id, name_mm, name_en, price, available, created_at) \
             VALUES (?, ?, ?, ?, 1, ?)",
        )
        .bind(id)
        .bind(name_mm)
        .bind(name_en)
        .bind(price)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }
}

async fn table(service: &LifecycleService, id: i64) -> DiningTable {
    sqlx::query_as::<_, DiningTable>("SELECT * FROM tables WHERE id = ?")
        .bind(id)
        .fetch_one(service.pool())
        .await
        .unwrap()
}

async fn order(service: &LifecycleService, id: i64) -> Order {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_one(service.pool())
        .await
        .unwrap()
}

async fn order_count(service: &LifecycleService, table_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE table_id = ?")
        .bind(table_id)
        .fetch_one(service.pool())
        .await
        .unwrap()
}

/// Walk one item through the whole kitchen pipeline up to (not including)
/// serve
async fn cook(service: &LifecycleService, item_id: i64) -> OrderItem {
    service.receive_item(item_id).await.unwrap();
    service.start_cooking(item_id).await.unwrap();
    service.mark_done(item_id).await.unwrap()
}

#[tokio::test]
async fn claim_is_idempotent() {
    let (_dir, service) = setup().await;

    let first = service.claim_table(1).await.unwrap();
    assert_eq!(first.status, OrderStatus::Pending);
    assert_eq!(first.total_amount, 0.0);
    assert_eq!(table(&service, 1).await.status, TableStatus::Occupied);

    // Second claim returns the same open order, creates nothing
    let second = service.claim_table(1).await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(order_count(&service, 1).await, 1);
}

#[tokio::test]
async fn claim_unknown_table_is_not_found() {
    let (_dir, service) = setup().await;
    let err = service.claim_table(99).await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_claims_create_one_order() {
    let (_dir, service) = setup().await;

    let (a, b) = tokio::join!(
        tokio::spawn({
            let s = service.clone();
            async move { s.claim_table(2).await }
        }),
        tokio::spawn({
            let s = service.clone();
            async move { s.claim_table(2).await }
        }),
    );
    let a = a.unwrap().unwrap();
    let b = b.unwrap().unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(order_count(&service, 2).await, 1);
}

#[tokio::test]
async fn add_items_recomputes_total() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;

    let created = service
        .add_items(
            order_id,
            vec![
                CartItemInput {
                    product_id: 1,
                    quantity: 2,
                },
                CartItemInput {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|i| i.status == ItemStatus::Pending));
    // Price is snapshot at insert: 2 x 500 + 1 x 1200
    assert_eq!(order(&service, order_id).await.total_amount, 2200.0);

    // A menu price change never reprices existing items
    sqlx::query("UPDATE products SET price = 9999 WHERE id = 1")
        .execute(service.pool())
        .await
        .unwrap();
    service
        .add_items(
            order_id,
            vec![CartItemInput {
                product_id: 2,
                quantity: 1,
            }],
        )
        .await
        .unwrap();
    assert_eq!(order(&service, order_id).await.total_amount, 3400.0);
}

#[tokio::test]
async fn add_items_unknown_product_is_atomic() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;

    let err = service
        .add_items(
            order_id,
            vec![
                CartItemInput {
                    product_id: 1,
                    quantity: 1,
                },
                CartItemInput {
                    product_id: 777,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound(_)));

    // Nothing inserted, total untouched
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = ?")
        .bind(order_id)
        .fetch_one(service.pool())
        .await
        .unwrap();
    assert_eq!(items, 0);
    assert_eq!(order(&service, order_id).await.total_amount, 0.0);
}

#[tokio::test]
async fn add_items_rejects_bad_quantity() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;

    let err = service
        .add_items(
            order_id,
            vec![CartItemInput {
                product_id: 1,
                quantity: 0,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Validation(_)));
}

#[tokio::test]
async fn item_pipeline_stamps_forward_only() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;
    let item_id = service
        .add_items(
            order_id,
            vec![CartItemInput {
                product_id: 1,
                quantity: 1,
            }],
        )
        .await
        .unwrap()[0]
        .id;

    // Skipping receive is rejected and leaves no stamp behind
    let err = service.start_cooking(item_id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition(_)));

    let received = service.receive_item(item_id).await.unwrap();
    assert_eq!(received.status, ItemStatus::Received);
    assert!(received.received_at.is_some());
    assert!(received.cooking_started_at.is_none());

    let cooking = service.start_cooking(item_id).await.unwrap();
    let done = service.mark_done(item_id).await.unwrap();
    let served = service.serve_item(item_id).await.unwrap();

    // Stamps are monotonic and each set exactly once
    let received_at = served.received_at.unwrap();
    let cooking_at = served.cooking_started_at.unwrap();
    let cooked_at = served.cooked_at.unwrap();
    let served_at = served.served_at.unwrap();
    assert!(received_at <= cooking_at);
    assert!(cooking_at <= cooked_at);
    assert!(cooked_at <= served_at);
    assert_eq!(received.received_at, served.received_at);
    assert_eq!(cooking.cooking_started_at, served.cooking_started_at);
    assert_eq!(done.cooked_at, served.cooked_at);

    // Double-apply is rejected, not silently repeated
    let err = service.serve_item(item_id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition(_)));
}

#[tokio::test]
async fn serving_last_item_promotes_order_once() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;
    let items = service
        .add_items(
            order_id,
            vec![
                CartItemInput {
                    product_id: 1,
                    quantity: 1,
                },
                CartItemInput {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();

    cook(&service, items[0].id).await;
    cook(&service, items[1].id).await;

    service.serve_item(items[0].id).await.unwrap();
    // One item still unserved: order stays PENDING
    assert_eq!(order(&service, order_id).await.status, OrderStatus::Pending);

    service.serve_item(items[1].id).await.unwrap();
    assert_eq!(order(&service, order_id).await.status, OrderStatus::Served);
}

#[tokio::test]
async fn concurrent_final_serves_promote_once() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;
    let items = service
        .add_items(
            order_id,
            vec![
                CartItemInput {
                    product_id: 1,
                    quantity: 1,
                },
                CartItemInput {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();
    cook(&service, items[0].id).await;
    cook(&service, items[1].id).await;

    let (a, b) = tokio::join!(
        tokio::spawn({
            let s = service.clone();
            let id = items[0].id;
            async move { s.serve_item(id).await }
        }),
        tokio::spawn({
            let s = service.clone();
            let id = items[1].id;
            async move { s.serve_item(id).await }
        }),
    );
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    // Whichever serve landed last observed the other's commit and promoted
    assert_eq!(order(&service, order_id).await.status, OrderStatus::Served);
}

#[tokio::test]
async fn payment_requires_slip_for_bank_transfer() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;

    let err = service
        .submit_payment(
            order_id,
            PaymentSubmission {
                payment_method: PaymentMethod::BankTransfer,
                payment_slip: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Validation(_)));

    let order = service
        .submit_payment(
            order_id,
            PaymentSubmission {
                payment_method: PaymentMethod::BankTransfer,
                payment_slip: Some("slip-ref-001".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(order.payment_method, Some(PaymentMethod::BankTransfer));
    assert_eq!(order.payment_slip.as_deref(), Some("slip-ref-001"));
    // Submission alone settles nothing
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(!order.payment_verified);
}

#[tokio::test]
async fn verify_payment_requires_served_order() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;
    service
        .submit_payment(
            order_id,
            PaymentSubmission {
                payment_method: PaymentMethod::Cash,
                payment_slip: None,
            },
        )
        .await
        .unwrap();

    // Nothing served yet
    let err = service.verify_payment(order_id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition(_)));
}

#[tokio::test]
async fn full_cash_flow_scenario() {
    let (_dir, service) = setup().await;

    // Table 3 is claimed, order O created, table OCCUPIED
    let order_id = service.claim_table(3).await.unwrap().id;
    assert_eq!(table(&service, 3).await.status, TableStatus::Occupied);

    // Two items added (qty 2 @ 500, qty 1 @ 1200): total 2200
    let items = service
        .add_items(
            order_id,
            vec![
                CartItemInput {
                    product_id: 1,
                    quantity: 2,
                },
                CartItemInput {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();
    assert_eq!(order(&service, order_id).await.total_amount, 2200.0);

    // Kitchen receives, cooks, marks done; waiter serves both
    for item in &items {
        cook(&service, item.id).await;
        service.serve_item(item.id).await.unwrap();
    }
    assert_eq!(order(&service, order_id).await.status, OrderStatus::Served);

    // Cleaning is rejected while the order is still active
    let err = service.clean_table(3).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition(_)));

    // Customer declares CASH, cashier verifies
    service
        .submit_payment(
            order_id,
            PaymentSubmission {
                payment_method: PaymentMethod::Cash,
                payment_slip: None,
            },
        )
        .await
        .unwrap();
    let paid = service.verify_payment(order_id).await.unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);
    assert!(paid.payment_verified);
    assert!(paid.completed_at.is_some());

    // Verification does not free the table; cleaning does
    assert_eq!(table(&service, 3).await.status, TableStatus::Occupied);
    let cleaned = service.clean_table(3).await.unwrap();
    assert_eq!(cleaned.status, TableStatus::Free);

    // Settling twice is rejected
    let err = service.verify_payment(order_id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition(_)));

    // The table is reusable: a fresh claim opens a new order
    let next = service.claim_table(3).await.unwrap();
    assert_ne!(next.id, order_id);
    assert_eq!(next.status, OrderStatus::Pending);
}

#[tokio::test]
async fn complete_order_frees_table_in_one_step() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(2).await.unwrap().id;
    service
        .add_items(
            order_id,
            vec![CartItemInput {
                product_id: 1,
                quantity: 1,
            }],
        )
        .await
        .unwrap();

    let completed = service.complete_order(order_id).await.unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(table(&service, 2).await.status, TableStatus::Free);

    // Terminal orders accept no more items
    let err = service
        .add_items(
            order_id,
            vec![CartItemInput {
                product_id: 1,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidTransition(_)));
}

#[tokio::test]
async fn views_project_pipeline_state() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;
    let items = service
        .add_items(
            order_id,
            vec![
                CartItemInput {
                    product_id: 1,
                    quantity: 2,
                },
                CartItemInput {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();

    // Both items queue for the kitchen
    let queue = service.kitchen_queue().await.unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].table_number, 1);
    assert!(queue.iter().all(|i| i.status == ItemStatus::Pending));

    // One item cooked: it shows up for the waiter, still in the kitchen
    // queue until served
    cook(&service, items[0].id).await;
    let ready = service.ready_to_serve().await.unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].order_id, order_id);
    assert_eq!(ready[0].items.len(), 1);
    assert_eq!(ready[0].items[0].status, ItemStatus::Done);
    assert_eq!(service.kitchen_queue().await.unwrap().len(), 2);

    // Nothing pends payment until the order is fully served
    assert!(service.pending_payment().await.unwrap().is_empty());

    service.serve_item(items[0].id).await.unwrap();
    cook(&service, items[1].id).await;
    service.serve_item(items[1].id).await.unwrap();

    // Served items leave the kitchen queue; the order pends payment
    assert!(service.kitchen_queue().await.unwrap().is_empty());
    let pending = service.pending_payment().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].order.id, order_id);
    assert_eq!(pending[0].table_number, 1);
    assert_eq!(pending[0].items.len(), 2);
    assert_eq!(pending[0].order.total_amount, 2200.0);
}

#[tokio::test]
async fn tables_overview_tracks_running_bill() {
    let (_dir, service) = setup().await;
    let order_id = service.claim_table(1).await.unwrap().id;
    service
        .add_items(
            order_id,
            vec![CartItemInput {
                product_id: 2,
                quantity: 2,
            }],
        )
        .await
        .unwrap();

    let repo = teahouse_server::db::repository::DiningTableRepository::new(service.pool().clone());
    let overview = repo.list_with_bill().await.unwrap();
    assert_eq!(overview.len(), 3);

    let occupied = overview.iter().find(|t| t.id == 1).unwrap();
    assert_eq!(occupied.status, TableStatus::Occupied);
    assert_eq!(occupied.current_bill, 2400.0);
    assert_eq!(occupied.order_id, Some(order_id));

    let free = overview.iter().find(|t| t.id == 2).unwrap();
    assert_eq!(free.status, TableStatus::Free);
    assert_eq!(free.current_bill, 0.0);
    assert_eq!(free.order_id, None);
}
