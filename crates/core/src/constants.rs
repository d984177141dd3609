/// Suffix appended to a stock symbol to form the symbol of its right.
pub const RIGHT_SYMBOL_SUFFIX: &str = "_X";

/// Fixed price paid per right when it is converted into the underlying stock.
pub const RIGHT_USAGE_PRICE_PER_RIGHT: i64 = 100;

/// Sub-second precision (digits) kept on event timestamps.
pub const TIMESTAMP_SUBSEC_DIGITS: u16 = 6;

/// Display format used in event descriptions.
pub const DESCRIPTION_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
