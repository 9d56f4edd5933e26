//! Utility module - shared helpers and types
//!
//! - [`AppError`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse, ok_with_message};
pub use result::AppResult;
