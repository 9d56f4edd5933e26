//! Health check endpoint

use axum::Json;
use serde_json::{Value, json};

use crate::utils::{AppResponse, ok_with_message};

/// GET /api/health - liveness probe
pub async fn check() -> Json<AppResponse<Value>> {
    ok_with_message(json!({ "status": "OK" }), "Teahouse POS API is running")
}
