use serde::Serialize;

use crate::core::Symbol;

/// Quote, profile and valuation data for one symbol, with display strings precomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetails {
    pub symbol: Symbol,
    pub company: String,
    pub current_price: f64,
    pub change_percent: f64,
    /// e.g. `"$1,234.56"`.
    pub price_formatted: String,
    /// e.g. `"+1.23%"`.
    pub change_formatted: String,
    /// Normalized annual P/E to one decimal, or `"—"` when unavailable.
    pub pe_ratio: String,
    /// e.g. `"$2.95T"`.
    pub market_cap_formatted: String,
}
