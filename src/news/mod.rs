//! Market news: per-symbol company news merged fairly, with general news as the fallback tier.

mod api;
mod format;
mod model;
mod wire;

pub use format::{format_article, validate_article};
pub use model::MarketNewsArticle;
pub use wire::RawNewsArticle;

use crate::core::{
    FinnhubClient, SignalistError, Symbol,
    client::{CacheMode, RetryConfig},
    normalize_symbols,
};

/// Fetches up to six news articles for `symbols`, or general market news when none apply.
///
/// # Errors
///
/// Returns [`SignalistError::NewsFetch`] if no API key is configured or the general-news
/// fallback fails. Individual symbol failures are absorbed.
pub async fn get_news<S: AsRef<str>>(
    client: &FinnhubClient,
    symbols: &[S],
) -> Result<Vec<MarketNewsArticle>, SignalistError> {
    NewsBuilder::new(client).symbols(symbols).fetch().await
}

/// A builder for the aggregated news feed.
#[derive(Debug, Clone)]
pub struct NewsBuilder {
    client: FinnhubClient,
    symbols: Vec<Symbol>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl NewsBuilder {
    /// Creates a builder that, with no symbols added, fetches general news.
    pub fn new(client: &FinnhubClient) -> Self {
        Self {
            client: client.clone(),
            symbols: Vec::new(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the symbols to pull company news for. Blank entries and repeats are dropped;
    /// the remaining order decides round-robin priority.
    #[must_use]
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.symbols = normalize_symbols(symbols);
        self
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// See [`get_news`].
    #[tracing::instrument(skip(self), err, fields(symbols = self.symbols.len()))]
    pub async fn fetch(self) -> Result<Vec<MarketNewsArticle>, SignalistError> {
        api::fetch_news(
            &self.client,
            &self.symbols,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }
}
