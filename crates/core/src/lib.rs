//! Rightsbook Core - Domain entities, services, and traits.
//!
//! Holdings of stocks and stock rights are never stored directly. They are
//! recomputed from an append-only log of signed quantity changes, and every
//! mutating service validates against that recomputed state before appending.
//! The crate is storage-agnostic: the event log is a trait implemented by the
//! in-memory adapter here and by the `storage-sqlite` crate.

pub mod capital_raise;
pub mod constants;
pub mod errors;
pub mod event_log;
pub mod holdings;
pub mod rights;
pub mod securities;
pub mod utils;

pub use event_log::{ActionType, EventLogRepositoryTrait, SecurityChangeEvent};
pub use holdings::HoldingSnapshot;
pub use securities::{Security, SecurityKind};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
