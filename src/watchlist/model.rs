use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Symbol;
use crate::details::StockDetails;

/// One stored watchlist row. `(user_id, symbol)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub user_id: String,
    pub symbol: Symbol,
    pub company: String,
    pub added_at: DateTime<Utc>,
}

/// Result of a watchlist mutation as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchlistOutcome {
    pub success: bool,
    pub message: String,
}

impl WatchlistOutcome {
    pub(crate) fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    pub(crate) fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// A watchlist row with live market data attached when it could be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub item: WatchlistItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<StockDetails>,
}
