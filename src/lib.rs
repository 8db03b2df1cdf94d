//! signalist: market news aggregation and stock search over the Finnhub API.
//!
//! - [`news`]: per-symbol company news merged round-robin, general news as the fallback.
//! - [`search`]: popular symbols or symbol search, annotated with watchlist membership.
//! - [`details`]: quote, profile and valuation for a single symbol.
//! - [`watchlist`]: per-user watchlists behind a pluggable [`WatchlistStore`].
//!
//! Per-request state (caller identity, memoized results) lives in a [`RequestContext`]
//! created at the start of each request.

pub mod core;
pub mod details;
pub mod news;
pub mod profile;
pub mod search;
mod service;
pub mod watchlist;

pub use crate::core::client::{Backoff, CacheMode, RetryConfig};
pub use crate::core::{
    FetchOptions, FinnhubClient, FinnhubClientBuilder, RequestCache, RequestContext,
    SignalistError, Session, SessionUser, Symbol,
};
pub use details::{StockDetails, get_stock_details};
pub use news::{MarketNewsArticle, NewsBuilder, RawNewsArticle, get_news};
pub use profile::CompanyProfile;
pub use search::{StockWithWatchlistStatus, search_stocks};
pub use service::Signalist;
pub use watchlist::{
    InMemoryWatchlistStore, WatchlistEntry, WatchlistItem, WatchlistOutcome, WatchlistStore,
};

/// Installs a `fmt` subscriber honoring `RUST_LOG` (default `signalist=info`).
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signalist=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
