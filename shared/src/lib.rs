//! Shared types for the teahouse POS
//!
//! Domain models and status machines used by the server and by API
//! consumers. Database derives are gated behind the `db` feature so a
//! client can depend on the models without pulling in sqlx.

pub mod models;
pub mod status;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::*;
pub use status::{ItemStatus, OrderStatus, PaymentMethod, TableStatus, TransitionError};
