use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::lifecycle::LifecycleService;
use crate::utils::AppError;

/// Server state - shared references to every service
///
/// Cloning is shallow (Arc + pool handles); every handler gets its own copy.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | immutable configuration |
/// | db | SQLite connection pool |
/// | lifecycle | the order/table/item coordinator |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub lifecycle: LifecycleService,
}

impl ServerState {
    /// Open the database and wire up the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let lifecycle = LifecycleService::new(db.pool.clone());
        Ok(Self {
            config: Arc::new(config.clone()),
            db,
            lifecycle,
        })
    }
}
