//! Product API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::utils::AppResult;
use shared::models::Product;

/// GET /api/products - the available menu
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.pool.clone());
    let products = repo.find_available().await?;
    Ok(Json(products))
}
