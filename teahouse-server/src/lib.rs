//! Teahouse POS - order/table/item lifecycle coordinator
//!
//! Coordinates a restaurant's service workflow: a table is claimed, an order
//! accumulates line items, each item moves through the kitchen pipeline, and
//! payment settles the order and frees the table. Four role surfaces
//! (customer, kitchen, waiter, cashier) poll and mutate the same rows; every
//! multi-step operation runs as one SQLite transaction.
//!
//! # Module structure
//!
//! ```text
//! teahouse-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── db/            # pool, migrations, read-side repositories
//! ├── lifecycle/     # the coordinator: claim, ledger, pipeline, views
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use lifecycle::{LifecycleError, LifecycleService};
pub use utils::{AppError, AppResult};

// Re-export logger setup
pub use utils::logger::init_logger;
