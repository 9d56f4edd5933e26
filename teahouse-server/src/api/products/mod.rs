//! Product API module

pub mod handler;
