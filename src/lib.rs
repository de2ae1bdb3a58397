//! Lead Logger Library
//!
//! Receives lead-capture events as flat JSON over HTTP and upserts them into a
//! local SQLite table keyed by chat id. Also serves read-only views of the
//! stored leads.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: SQLite pool setup and schema initialization.
//! - `db_storage`: Lead upsert and query operations.
//! - `decoder`: Builds a `Lead` from a request body.
//! - `errors`: Error handling types.
//! - `extract`: Flat JSON field extraction.
//! - `handlers`: HTTP request handlers.
//! - `models`: Lead and query/response models.
//! - `routes`: Router assembly.

pub mod config;
pub mod db;
pub mod db_storage;
pub mod decoder;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
