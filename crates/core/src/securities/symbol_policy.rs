//! Mapping between a stock symbol and the symbol of its right.
//!
//! No registry lookup happens here; callers confirm that the mapped symbol
//! actually exists.

use crate::constants::RIGHT_SYMBOL_SUFFIX;

use super::normalize_symbol;

/// Right symbol for a stock: the upper-cased stock symbol plus `_X`.
pub fn right_of(stock_symbol: &str) -> String {
    format!("{}{}", normalize_symbol(stock_symbol), RIGHT_SYMBOL_SUFFIX)
}

/// Stock symbol for a right.
///
/// Strips the `_X` suffix when present. Any other input comes back in its
/// normalized form, so the mapping is lossy for symbols that are not rights.
pub fn stock_of(right_symbol: &str) -> String {
    let normalized = normalize_symbol(right_symbol);
    match normalized.strip_suffix(RIGHT_SYMBOL_SUFFIX) {
        Some(stock) if !stock.is_empty() => stock.to_string(),
        _ => normalized,
    }
}

/// True when the symbol is shaped like a right symbol.
pub fn is_right_symbol(symbol: &str) -> bool {
    let normalized = normalize_symbol(symbol);
    normalized.len() > RIGHT_SYMBOL_SUFFIX.len() && normalized.ends_with(RIGHT_SYMBOL_SUFFIX)
}
