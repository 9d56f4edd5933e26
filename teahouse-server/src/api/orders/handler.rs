//! Order API Handlers
//!
//! The role-facing surface of the lifecycle coordinator. Mutations delegate
//! to [`LifecycleService`]; reads go through the repositories and view
//! projections.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::lifecycle::ReadyOrder;
use crate::utils::AppResult;
use shared::models::{
    CartItemInput, CheckoutSummary, DiningTable, KitchenItem, Order, OrderDetail, OrderItem,
    PaymentSubmission,
};

/// Request body for POST /api/orders/start
#[derive(Debug, Deserialize)]
pub struct StartOrderRequest {
    pub table_id: i64,
}

/// Request body for POST /api/orders/:id/items
#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<CartItemInput>,
}

// ==================== Customer ====================

/// POST /api/orders/start - claim a table (idempotent)
pub async fn start(
    State(state): State<ServerState>,
    Json(payload): Json<StartOrderRequest>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle.claim_table(payload.table_id).await?;
    Ok(Json(order))
}

/// GET /api/orders/:id - order with its items
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let repo = OrderRepository::new(state.db.pool.clone());
    let detail = repo.get_detail(id).await?;
    Ok(Json(detail))
}

/// POST /api/orders/:id/items - add items, atomic all-or-nothing
pub async fn add_items(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddItemsRequest>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let items = state.lifecycle.add_items(id, payload.items).await?;
    Ok(Json(items))
}

/// GET /api/orders/:id/checkout - order summary joined with table number
pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CheckoutSummary>> {
    let repo = OrderRepository::new(state.db.pool.clone());
    let summary = repo.get_checkout(id).await?;
    Ok(Json(summary))
}

/// POST /api/orders/:id/submit-payment - declare the payment method
pub async fn submit_payment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentSubmission>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle.submit_payment(id, payload).await?;
    Ok(Json(order))
}

// ==================== Kitchen ====================

/// GET /api/orders/kitchen/pending - the kitchen queue
pub async fn kitchen_pending(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<KitchenItem>>> {
    let items = state.lifecycle.kitchen_queue().await?;
    Ok(Json(items))
}

/// PATCH /api/orders/items/:item_id/receive
pub async fn receive_item(
    State(state): State<ServerState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<OrderItem>> {
    let item = state.lifecycle.receive_item(item_id).await?;
    Ok(Json(item))
}

/// PATCH /api/orders/items/:item_id/start-cooking
pub async fn start_cooking(
    State(state): State<ServerState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<OrderItem>> {
    let item = state.lifecycle.start_cooking(item_id).await?;
    Ok(Json(item))
}

/// PATCH /api/orders/items/:item_id/done-cooking
pub async fn done_cooking(
    State(state): State<ServerState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<OrderItem>> {
    let item = state.lifecycle.mark_done(item_id).await?;
    Ok(Json(item))
}

// ==================== Waiter ====================

/// PATCH /api/orders/items/:item_id/serve - may promote the order to SERVED
pub async fn serve_item(
    State(state): State<ServerState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<OrderItem>> {
    let item = state.lifecycle.serve_item(item_id).await?;
    Ok(Json(item))
}

/// GET /api/orders/waiter/ready-to-serve
pub async fn ready_to_serve(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ReadyOrder>>> {
    let orders = state.lifecycle.ready_to_serve().await?;
    Ok(Json(orders))
}

/// POST /api/orders/tables/:table_id/clean - free the table after cleanup
pub async fn clean_table(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = state.lifecycle.clean_table(table_id).await?;
    Ok(Json(table))
}

// ==================== Cashier ====================

/// GET /api/orders/cashier/pending-payment
pub async fn pending_payment(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<CheckoutSummary>>> {
    let orders = state.lifecycle.pending_payment().await?;
    Ok(Json(orders))
}

/// POST /api/orders/:id/verify-payment - SERVED → PAID
pub async fn verify_payment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle.verify_payment(id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/complete - simplified flow, also frees the table
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle.complete_order(id).await?;
    Ok(Json(order))
}
