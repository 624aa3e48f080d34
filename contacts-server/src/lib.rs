//! REST server for a contact book, backed by MongoDB or by process memory.

pub mod api;
pub mod config;
pub mod data_source;
pub mod error;
pub mod state;
