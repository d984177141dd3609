use std::collections::HashMap;
use std::sync::RwLock;

use log::debug;

use crate::errors::{Error, Result};

use super::{normalize_symbol, right_of, Security, SecurityRegistryTrait};

/// Process-local security registry keyed by normalized symbol.
#[derive(Default)]
pub struct InMemorySecurityRegistry {
    securities: RwLock<HashMap<String, Security>>,
}

impl InMemorySecurityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the security under its symbol.
    pub fn register(&self, security: Security) -> Result<()> {
        let mut securities = self
            .securities
            .write()
            .map_err(|_| Error::Unexpected("security registry lock poisoned".to_string()))?;
        debug!("Registering security {} ({})", security.symbol, security.kind);
        securities.insert(security.symbol.clone(), security);
        Ok(())
    }

    /// Registers a stock together with its right, returning both.
    pub fn register_stock_with_right(
        &self,
        stock_symbol: &str,
        name: Option<&str>,
    ) -> Result<(Security, Security)> {
        let mut stock = Security::stock(stock_symbol);
        let mut right = Security::right(&right_of(stock_symbol));
        if let Some(name) = name {
            stock = stock.with_name(name);
            right = right.with_name(format!("{} Right", name));
        }
        self.register(stock.clone())?;
        self.register(right.clone())?;
        Ok((stock, right))
    }
}

impl SecurityRegistryTrait for InMemorySecurityRegistry {
    fn find_by_symbol(&self, symbol: &str) -> Result<Option<Security>> {
        let securities = self
            .securities
            .read()
            .map_err(|_| Error::Unexpected("security registry lock poisoned".to_string()))?;
        Ok(securities.get(&normalize_symbol(symbol)).cloned())
    }

    fn list_securities(&self) -> Result<Vec<Security>> {
        let securities = self
            .securities
            .read()
            .map_err(|_| Error::Unexpected("security registry lock poisoned".to_string()))?;
        let mut all: Vec<Security> = securities.values().cloned().collect();
        all.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::securities::{require_security, SecurityKind};

    #[test]
    fn test_add_and_find_by_symbol() {
        let registry = InMemorySecurityRegistry::new();
        registry
            .register(
                Security::stock("FOOLAD")
                    .with_name("foolad-mobarake")
                    .with_isin("1234567890"),
            )
            .unwrap();

        let found = registry.find_by_symbol("foolad").unwrap().unwrap();
        assert_eq!(found.symbol, "FOOLAD");
        assert_eq!(found.isin.as_deref(), Some("1234567890"));
    }

    #[test]
    fn test_wrong_symbol_returns_none() {
        let registry = InMemorySecurityRegistry::new();
        assert!(registry.find_by_symbol("NOPE").unwrap().is_none());
    }

    #[test]
    fn test_register_stock_with_right() {
        let registry = InMemorySecurityRegistry::new();
        let (stock, right) = registry
            .register_stock_with_right("foo", Some("Foo Inc"))
            .unwrap();
        assert_eq!(stock.symbol, "FOO");
        assert_eq!(right.symbol, "FOO_X");
        assert_eq!(right.name.as_deref(), Some("Foo Inc Right"));

        let symbols: Vec<String> = registry
            .list_securities()
            .unwrap()
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        assert_eq!(symbols, vec!["FOO", "FOO_X"]);
    }

    #[test]
    fn test_require_security_checks_existence_and_kind() {
        let registry = InMemorySecurityRegistry::new();
        registry.register_stock_with_right("FOO", None).unwrap();

        assert!(require_security(&registry, "FOO_X", SecurityKind::Right).is_ok());
        assert!(matches!(
            require_security(&registry, "BAR_X", SecurityKind::Right),
            Err(Error::UnknownSecurity(symbol)) if symbol == "BAR_X"
        ));
        assert!(matches!(
            require_security(&registry, "FOO", SecurityKind::Right),
            Err(Error::InvalidArgument(_))
        ));
    }
}
