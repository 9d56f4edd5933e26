//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`products`] - menu read (customer)
//! - [`tables`] - floor overview (waiter)
//! - [`orders`] - order lifecycle: claim, items, kitchen pipeline, payment
//!
//! Every GET is side-effect free (the clients poll them on an interval);
//! every mutating route is safe to invoke redundantly (rejected, not
//! double-applied).

pub mod health;
pub mod orders;
pub mod products;
pub mod tables;

use axum::Router;
use axum::routing::{get, patch, post};

use crate::core::ServerState;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/health", get(health::check))
        // Menu
        .route("/api/products", get(products::handler::list))
        // Floor overview
        .route("/api/tables", get(tables::handler::list))
        .route("/api/tables/{id}", get(tables::handler::get_by_id))
        // Customer
        .route("/api/orders/start", post(orders::handler::start))
        .route("/api/orders/{id}", get(orders::handler::get_by_id))
        .route("/api/orders/{id}/items", post(orders::handler::add_items))
        .route("/api/orders/{id}/checkout", get(orders::handler::checkout))
        .route(
            "/api/orders/{id}/submit-payment",
            post(orders::handler::submit_payment),
        )
        // Kitchen
        .route(
            "/api/orders/kitchen/pending",
            get(orders::handler::kitchen_pending),
        )
        .route(
            "/api/orders/items/{item_id}/receive",
            patch(orders::handler::receive_item),
        )
        .route(
            "/api/orders/items/{item_id}/start-cooking",
            patch(orders::handler::start_cooking),
        )
        .route(
            "/api/orders/items/{item_id}/done-cooking",
            patch(orders::handler::done_cooking),
        )
        // Waiter
        .route(
            "/api/orders/items/{item_id}/serve",
            patch(orders::handler::serve_item),
        )
        .route(
            "/api/orders/waiter/ready-to-serve",
            get(orders::handler::ready_to_serve),
        )
        .route(
            "/api/orders/tables/{table_id}/clean",
            post(orders::handler::clean_table),
        )
        // Cashier
        .route(
            "/api/orders/cashier/pending-payment",
            get(orders::handler::pending_payment),
        )
        .route(
            "/api/orders/{id}/verify-payment",
            post(orders::handler::verify_payment),
        )
        .route("/api/orders/{id}/complete", post(orders::handler::complete))
        .with_state(state)
}
