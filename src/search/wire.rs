use serde::Deserialize;

/// `/search` response envelope.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[allow(dead_code)]
    #[serde(default)]
    pub(crate) count: Option<u64>,
    #[serde(default)]
    pub(crate) result: Option<Vec<StockSearchResult>>,
}

/// One upstream match, or one popular symbol promoted from its profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSearchResult {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_symbol: Option<String>,
    #[serde(rename = "type")]
    #[serde(default)]
    pub kind: Option<String>,
    /// Listing exchange, known only for matches built from a company profile.
    #[serde(skip)]
    pub exchange: Option<String>,
}
