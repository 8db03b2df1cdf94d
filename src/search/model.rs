use serde::Serialize;

use crate::core::Symbol;

/// A search hit annotated with whether the caller already watches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockWithWatchlistStatus {
    pub symbol: Symbol,
    pub name: String,
    pub exchange: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_in_watchlist: bool,
}
