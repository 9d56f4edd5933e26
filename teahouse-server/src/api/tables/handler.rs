//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};
use shared::models::TableWithBill;

/// GET /api/tables - every table with its running bill
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TableWithBill>>> {
    let repo = DiningTableRepository::new(state.db.pool.clone());
    let tables = repo.list_with_bill().await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - one table with its running bill
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TableWithBill>> {
    let repo = DiningTableRepository::new(state.db.pool.clone());
    let table = repo
        .find_with_bill(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(Json(table))
}
