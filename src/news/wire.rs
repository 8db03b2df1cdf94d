use serde::{Deserialize, Serialize};

/// A news record as Finnhub returns it from `/company-news` and `/news`.
///
/// Every field is optional on the wire; [`validate_article`](super::validate_article) decides
/// whether a record is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNewsArticle {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Publication time, epoch seconds.
    #[serde(default)]
    pub datetime: Option<i64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub related: Option<String>,
}

/// Decodes each element on its own so one malformed record does not sink the whole list.
pub(crate) fn decode_articles(items: Vec<serde_json::Value>) -> Vec<RawNewsArticle> {
    items
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<RawNewsArticle>(v) {
            Ok(a) => Some(a),
            Err(e) => {
                tracing::debug!(error = %e, "dropping undecodable news record");
                None
            }
        })
        .collect()
}
