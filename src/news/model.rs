use serde::Serialize;

use crate::core::Symbol;

/// A validated, normalized news article ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketNewsArticle {
    pub headline: String,
    pub summary: String,
    pub url: String,
    /// The publisher (e.g. "Reuters").
    pub source: String,
    /// Publication time, epoch seconds.
    pub datetime: i64,
    /// The watched symbol this article was fetched for. `None` for general market news.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_symbol: Option<Symbol>,
    pub is_company_news: bool,
}
