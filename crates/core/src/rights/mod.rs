//! Rights module - trading rights and converting them into stock.

mod rights_model;
mod rights_traits;
mod rights_trading_service;
mod rights_usage_service;


pub use rights_model::{RightOrder, RightUsageOutcome, RightUsageRequest};
pub use rights_traits::{RightTradingServiceTrait, RightUsageServiceTrait};
pub use rights_trading_service::RightTradingService;
pub use rights_usage_service::RightUsageService;
