//! Holdings module - the read model and the query facade over it.

mod adjustment_service;
mod holdings_model;
mod holdings_service;
mod read_model;


pub use adjustment_service::{AdjustmentService, AdjustmentServiceTrait};
pub use holdings_model::HoldingSnapshot;
pub use holdings_service::{HoldingsService, HoldingsServiceTrait};
pub use read_model::{rebuild, rebuild_up_to};
