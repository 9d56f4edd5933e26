//! Dining Table Repository

use super::RepoResult;
use shared::models::{DiningTable, TableWithBill};
use sqlx::SqlitePool;

/// The floor overview: every table left-joined with its active order.
/// COALESCE keeps the bill at zero for free tables.
const WITH_BILL: &str = "\
    SELECT t.id, t.table_number, t.status, \
           COALESCE(o.total_amount, 0.0) AS current_bill, \
           o.id AS order_id \
    FROM tables t \
    LEFT JOIN orders o \
        ON t.id = o.table_id AND o.status NOT IN ('PAID', 'COMPLETED')";

#[derive(Clone)]
pub struct DiningTableRepository {
    pool: SqlitePool,
}

impl DiningTableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM tables WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(table)
    }

    /// All tables with their running bill, ordered by table number
    pub async fn list_with_bill(&self) -> RepoResult<Vec<TableWithBill>> {
        let tables =
            sqlx::query_as::<_, TableWithBill>(&format!("{WITH_BILL} ORDER BY t.table_number"))
                .fetch_all(&self.pool)
                .await?;
        Ok(tables)
    }

    /// One table with its running bill
    pub async fn find_with_bill(&self, id: i64) -> RepoResult<Option<TableWithBill>> {
        let table = sqlx::query_as::<_, TableWithBill>(&format!("{WITH_BILL} WHERE t.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(table)
    }
}
