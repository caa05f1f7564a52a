//! # TaskHub Shared Library
//!
//! This crate contains the persistence layer used by the TaskHub API server:
//! the SQLite connection pool, embedded migrations, the entity models and
//! their CRUD operations, and the referential-integrity rules between them.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Users, categories and tasks with their data-access operations
//! - `error`: Data-layer error types
//! - `serde_utils`: Serde helpers for partial-update payloads

pub mod db;
pub mod error;
pub mod models;
pub mod serde_utils;

/// Current version of the TaskHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
