//! Data models
//!
//! Shared between teahouse-server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod dining_table;
pub mod order;
pub mod order_item;
pub mod product;

// Re-exports
pub use dining_table::*;
pub use order::*;
pub use order_item::*;
pub use product::*;
