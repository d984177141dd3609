use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Canonical form of a security symbol: trimmed and upper-cased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityKind {
    Stock,
    Right,
}

impl SecurityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityKind::Stock => "STOCK",
            SecurityKind::Right => "RIGHT",
        }
    }
}

impl fmt::Display for SecurityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STOCK" => Ok(SecurityKind::Stock),
            "RIGHT" => Ok(SecurityKind::Right),
            other => Err(format!("Unknown security kind: {}", other)),
        }
    }
}

/// An immutable security identity.
///
/// Two securities are equal when their (symbol, kind) pairs are equal; the
/// descriptive `name` and `isin` do not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub symbol: String,
    pub kind: SecurityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
}

impl Security {
    pub fn new(symbol: &str, kind: SecurityKind) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            kind,
            name: None,
            isin: None,
        }
    }

    pub fn stock(symbol: &str) -> Self {
        Self::new(symbol, SecurityKind::Stock)
    }

    pub fn right(symbol: &str) -> Self {
        Self::new(symbol, SecurityKind::Right)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    pub fn is_right(&self) -> bool {
        self.kind == SecurityKind::Right
    }
}

impl PartialEq for Security {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.kind == other.kind
    }
}

impl Eq for Security {}

impl Hash for Security {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.kind.hash(state);
    }
}
