use crate::errors::{Error, Result};

use super::{normalize_symbol, Security, SecurityKind};

/// Read-only lookup of known securities.
///
/// The registry is injected into services; the core never owns its lifecycle.
pub trait SecurityRegistryTrait: Send + Sync {
    fn find_by_symbol(&self, symbol: &str) -> Result<Option<Security>>;
    fn list_securities(&self) -> Result<Vec<Security>>;
}

/// Looks up `symbol` and checks that it is of the expected kind.
///
/// Missing symbols surface as `UnknownSecurity`; a symbol registered with a
/// different kind is an `InvalidArgument`.
pub fn require_security(
    registry: &dyn SecurityRegistryTrait,
    symbol: &str,
    kind: SecurityKind,
) -> Result<Security> {
    let normalized = normalize_symbol(symbol);
    let security = registry
        .find_by_symbol(&normalized)?
        .ok_or_else(|| Error::UnknownSecurity(normalized.clone()))?;
    if security.kind != kind {
        return Err(Error::invalid_argument(format!(
            "{} is a {}, expected a {}",
            security.symbol, security.kind, kind
        )));
    }
    Ok(security)
}
