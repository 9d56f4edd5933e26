//! Order API module

pub mod handler;
