//! Glide tables API client library
//!
//! A Rust async client for the Glide tables HTTP API, exposing row-level
//! CRUD (list, add, update, delete) against a single remote table.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod response;
pub mod transport;

mod client;

pub use client::*;
pub use config::Column;
pub use config::ColumnType;
pub use config::TableConfig;
pub use config::TableSchema;
pub use model::Row;
pub use model::Value;
pub use response::Payload;
