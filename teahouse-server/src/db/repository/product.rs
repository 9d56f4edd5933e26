//! Product Repository
//!
//! Menu reads only; menu management is not this service's concern. The
//! per-line price snapshot in the order ledger reads the products table
//! inside its own transaction, not through this repository.

use super::RepoResult;
use shared::models::Product;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All available products, for the customer menu
    pub async fn find_available(&self) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE available = 1 ORDER BY name_mm",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}
