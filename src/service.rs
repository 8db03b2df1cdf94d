use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    core::{FinnhubClient, RequestContext, SignalistError, Symbol},
    details::{self, StockDetails},
    news::{self, MarketNewsArticle, NewsBuilder},
    search::{self, StockWithWatchlistStatus},
    watchlist::{self, WatchlistEntry, WatchlistItem, WatchlistOutcome, WatchlistStore},
};

/// The read and write operations a front end needs, bound to one client and one store.
///
/// Cheap to clone. Per-request state lives in the [`RequestContext`] passed to each call.
#[derive(Clone)]
pub struct Signalist {
    client: FinnhubClient,
    watchlist: Arc<dyn WatchlistStore>,
}

impl std::fmt::Debug for Signalist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signalist")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl Signalist {
    pub fn new(client: FinnhubClient, watchlist: Arc<dyn WatchlistStore>) -> Self {
        Self { client, watchlist }
    }

    pub fn client(&self) -> &FinnhubClient {
        &self.client
    }

    pub fn store(&self) -> &dyn WatchlistStore {
        self.watchlist.as_ref()
    }

    /// Up to six articles for `symbols`, falling back to general market news.
    ///
    /// # Errors
    ///
    /// See [`news::get_news`].
    pub async fn news<S: AsRef<str>>(
        &self,
        symbols: &[S],
    ) -> Result<Vec<MarketNewsArticle>, SignalistError> {
        news::get_news(&self.client, symbols).await
    }

    /// A [`NewsBuilder`] for per-call cache and retry control.
    pub fn news_builder(&self) -> NewsBuilder {
        NewsBuilder::new(&self.client)
    }

    /// # Errors
    ///
    /// See [`search::search_stocks`].
    pub async fn search_stocks(
        &self,
        ctx: &RequestContext,
        query: Option<&str>,
    ) -> Result<Vec<StockWithWatchlistStatus>, SignalistError> {
        search::search_stocks(&self.client, self.store(), ctx, query).await
    }

    /// # Errors
    ///
    /// See [`details::get_stock_details`].
    pub async fn stock_details(
        &self,
        ctx: &RequestContext,
        symbol: &str,
    ) -> Result<StockDetails, SignalistError> {
        details::get_stock_details(&self.client, ctx, symbol).await
    }

    pub async fn watchlist_symbols(&self, email: &str) -> HashSet<Symbol> {
        watchlist::get_watchlist_symbols(self.store(), email).await
    }

    /// # Errors
    ///
    /// See [`watchlist::add_to_watchlist`].
    pub async fn add_to_watchlist(
        &self,
        ctx: &RequestContext,
        symbol: &str,
        company: &str,
    ) -> Result<WatchlistOutcome, SignalistError> {
        watchlist::add_to_watchlist(self.store(), ctx, symbol, company).await
    }

    /// # Errors
    ///
    /// See [`watchlist::remove_from_watchlist`].
    pub async fn remove_from_watchlist(
        &self,
        ctx: &RequestContext,
        symbol: &str,
    ) -> Result<WatchlistOutcome, SignalistError> {
        watchlist::remove_from_watchlist(self.store(), ctx, symbol).await
    }

    /// # Errors
    ///
    /// See [`watchlist::get_user_watchlist`].
    pub async fn user_watchlist(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<WatchlistItem>, SignalistError> {
        watchlist::get_user_watchlist(self.store(), ctx).await
    }

    /// # Errors
    ///
    /// See [`watchlist::get_watchlist_with_data`].
    pub async fn watchlist_with_data(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<WatchlistEntry>, SignalistError> {
        watchlist::get_watchlist_with_data(&self.client, self.store(), ctx).await
    }
}
