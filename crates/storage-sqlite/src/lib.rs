//! SQLite storage implementation for Rightsbook.
//!
//! This crate provides the database-backed event log using Diesel with SQLite.
//! It implements `EventLogRepositoryTrait` from `rightsbook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor every append goes through
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod event_log;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use event_log::EventLogRepository;

// Re-export from rightsbook-core for convenience
pub use rightsbook_core::errors::{DatabaseError, Error, Result};
