//! Securities module - identity, symbol policy and registry lookups.

mod securities_model;
mod securities_registry;
mod securities_traits;
mod symbol_policy;

pub use securities_model::{normalize_symbol, Security, SecurityKind};
pub use securities_registry::InMemorySecurityRegistry;
pub use securities_traits::{require_security, SecurityRegistryTrait};
pub use symbol_policy::{is_right_symbol, right_of, stock_of};
