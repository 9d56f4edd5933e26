//! Dining Table API module

pub mod handler;
