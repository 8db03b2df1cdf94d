use super::{MarketNewsArticle, RawNewsArticle};
use crate::core::Symbol;

const DEFAULT_SOURCE: &str = "Finnhub";

fn non_empty(s: Option<&str>) -> bool {
    s.is_some_and(|v| !v.trim().is_empty())
}

/// True when the record has a headline, a URL and a positive timestamp.
#[must_use]
pub fn validate_article(raw: &RawNewsArticle) -> bool {
    non_empty(raw.headline.as_deref())
        && non_empty(raw.url.as_deref())
        && raw.datetime.is_some_and(|t| t > 0)
}

/// Maps a record that passed [`validate_article`] into its display shape.
///
/// `_tie_break` is the record's position in the batch it came from. Ordering already follows
/// from the caller's iteration, so it is not stored.
#[must_use]
pub fn format_article(
    raw: &RawNewsArticle,
    is_company_news: bool,
    related_symbol: Option<&Symbol>,
    _tie_break: usize,
) -> MarketNewsArticle {
    let text = |s: &Option<String>| s.as_deref().map(str::trim).unwrap_or_default().to_string();
    let source = raw
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SOURCE);

    MarketNewsArticle {
        headline: text(&raw.headline),
        summary: text(&raw.summary),
        url: text(&raw.url),
        source: source.to_string(),
        datetime: raw.datetime.unwrap_or_default(),
        related_symbol: if is_company_news {
            related_symbol.cloned()
        } else {
            None
        },
        is_company_news,
    }
}
